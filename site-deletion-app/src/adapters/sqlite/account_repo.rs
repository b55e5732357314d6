//! `AccountRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait};

use site_deletion_core::error::{CoreError, CoreResult};
use site_deletion_core::traits::AccountRepository;
use site_deletion_core::types::DependentAccount;

use super::entity::dependent_account;
use super::{storage_error, SqliteStore};

impl dependent_account::Model {
    /// Convert a `SeaORM` row model into a domain `DependentAccount`.
    fn into_account(self) -> CoreResult<DependentAccount> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| CoreError::SerializationError(format!("Invalid created_at: {e}")))?
            .with_timezone(&chrono::Utc);

        Ok(DependentAccount {
            id: self.id,
            username: self.username,
            created_at,
        })
    }
}

#[async_trait]
impl AccountRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<DependentAccount>> {
        let rows = dependent_account::Entity::find()
            .all(&self.db)
            .await
            .map_err(storage_error("query accounts"))?;

        rows.into_iter()
            .map(dependent_account::Model::into_account)
            .collect()
    }

    async fn find_by_id(&self, id: &str) -> CoreResult<Option<DependentAccount>> {
        let row = dependent_account::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(storage_error("query account"))?;

        row.map(dependent_account::Model::into_account).transpose()
    }

    async fn save(&self, account: &DependentAccount) -> CoreResult<()> {
        let active_model = dependent_account::ActiveModel {
            id: Set(account.id.clone()),
            username: Set(account.username.clone()),
            created_at: Set(account.created_at.to_rfc3339()),
        };

        dependent_account::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(dependent_account::Column::Id)
                    .update_columns([
                        dependent_account::Column::Username,
                        dependent_account::Column::CreatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(storage_error("save account"))?;

        Ok(())
    }
}
