//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use site_deletion_core::types::SiteId;

const APP_DIR: &str = "site-deletion";

/// Permanently delete a hosted site and purge its local data.
#[derive(Parser, Debug)]
#[command(name = "site-deletion", version)]
pub struct Cli {
    /// ID of the site to delete
    pub site_id: SiteId,

    /// JSON config file
    #[arg(long, env = "SITE_DELETION_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides the config)
    #[arg(long)]
    pub database: Option<PathBuf>,

    /// Confirmation text; read from stdin when omitted
    #[arg(long)]
    pub confirm: Option<String>,
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_default()
                .join(APP_DIR)
                .join("config.json")
        })
    }
}

pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_default()
        .join(APP_DIR)
        .join("sites.db")
}
