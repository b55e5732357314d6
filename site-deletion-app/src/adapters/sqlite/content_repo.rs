//! `SiteContentRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait,
    QueryFilter,
};

use site_deletion_core::error::{CoreError, CoreResult};
use site_deletion_core::traits::SiteContentRepository;
use site_deletion_core::types::{MediaItem, Post, SiteContentSummary, SiteId, SiteSetting};

use super::entity::{media, post, site_setting};
use super::{site_key, storage_error, SqliteStore};

fn row_id(id: u64) -> CoreResult<i64> {
    i64::try_from(id).map_err(|_| CoreError::ValidationError(format!("ID out of range: {id}")))
}

#[async_trait]
impl SiteContentRepository for SqliteStore {
    async fn save_post(&self, post: &Post) -> CoreResult<()> {
        let active_model = post::ActiveModel {
            site_id: Set(site_key(post.site_id)?),
            id: Set(row_id(post.id)?),
            title: Set(post.title.clone()),
        };

        post::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([post::Column::SiteId, post::Column::Id])
                    .update_column(post::Column::Title)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(storage_error("save post"))?;
        Ok(())
    }

    async fn save_media(&self, media: &MediaItem) -> CoreResult<()> {
        let active_model = media::ActiveModel {
            site_id: Set(site_key(media.site_id)?),
            id: Set(row_id(media.id)?),
            remote_url: Set(media.remote_url.clone()),
        };

        media::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([media::Column::SiteId, media::Column::Id])
                    .update_column(media::Column::RemoteUrl)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(storage_error("save media"))?;
        Ok(())
    }

    async fn save_setting(&self, setting: &SiteSetting) -> CoreResult<()> {
        let active_model = site_setting::ActiveModel {
            site_id: Set(site_key(setting.site_id)?),
            key: Set(setting.key.clone()),
            value: Set(setting.value.clone()),
        };

        site_setting::Entity::insert(active_model)
            .on_conflict(
                OnConflict::columns([site_setting::Column::SiteId, site_setting::Column::Key])
                    .update_column(site_setting::Column::Value)
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(storage_error("save setting"))?;
        Ok(())
    }

    async fn content_summary(&self, site_id: SiteId) -> CoreResult<SiteContentSummary> {
        let key = site_key(site_id)?;

        let posts = post::Entity::find()
            .filter(post::Column::SiteId.eq(key))
            .count(&self.db)
            .await
            .map_err(storage_error("count posts"))?;
        let media = media::Entity::find()
            .filter(media::Column::SiteId.eq(key))
            .count(&self.db)
            .await
            .map_err(storage_error("count media"))?;
        let settings = site_setting::Entity::find()
            .filter(site_setting::Column::SiteId.eq(key))
            .count(&self.db)
            .await
            .map_err(storage_error("count settings"))?;

        Ok(SiteContentSummary {
            posts,
            media,
            settings,
        })
    }
}
