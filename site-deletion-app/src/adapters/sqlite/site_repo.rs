//! `SiteRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};

use site_deletion_core::error::CoreResult;
use site_deletion_core::traits::SiteRepository;
use site_deletion_core::types::{PurgePlan, PurgedRows, Site, SiteId};

use super::entity::{dependent_account, media, post, site, site_setting};
use super::{site_id_from_row, site_key, storage_error, SqliteStore};

impl site::Model {
    /// Convert a `SeaORM` row model into a domain `Site`.
    fn into_site(self) -> CoreResult<Site> {
        Ok(Site {
            id: site_id_from_row(self.id)?,
            name: self.name,
            url: self.url,
            is_admin: self.is_admin != 0,
            is_hosted_on_platform: self.is_hosted_on_platform != 0,
            dependent_account_id: self.dependent_account_id,
        })
    }
}

/// Convert a domain `Site` into a `SeaORM` active model for upsert.
fn site_to_active_model(site: &Site) -> CoreResult<site::ActiveModel> {
    Ok(site::ActiveModel {
        id: Set(site_key(site.id)?),
        name: Set(site.name.clone()),
        url: Set(site.url.clone()),
        is_admin: Set(i32::from(site.is_admin)),
        is_hosted_on_platform: Set(i32::from(site.is_hosted_on_platform)),
        dependent_account_id: Set(site.dependent_account_id.clone()),
    })
}

#[async_trait]
impl SiteRepository for SqliteStore {
    async fn find_all(&self) -> CoreResult<Vec<Site>> {
        let rows = site::Entity::find()
            .all(&self.db)
            .await
            .map_err(storage_error("query sites"))?;

        rows.into_iter().map(site::Model::into_site).collect()
    }

    async fn find_by_id(&self, id: SiteId) -> CoreResult<Option<Site>> {
        let row = site::Entity::find_by_id(site_key(id)?)
            .one(&self.db)
            .await
            .map_err(storage_error("query site"))?;

        row.map(site::Model::into_site).transpose()
    }

    async fn save(&self, site: &Site) -> CoreResult<()> {
        let active_model = site_to_active_model(site)?;

        site::Entity::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(site::Column::Id)
                    .update_columns([
                        site::Column::Name,
                        site::Column::Url,
                        site::Column::IsAdmin,
                        site::Column::IsHostedOnPlatform,
                        site::Column::DependentAccountId,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(storage_error("save site"))?;

        Ok(())
    }

    async fn count_referencing_account(
        &self,
        account_id: &str,
        excluding: SiteId,
    ) -> CoreResult<u64> {
        site::Entity::find()
            .filter(site::Column::DependentAccountId.eq(account_id))
            .filter(site::Column::Id.ne(site_key(excluding)?))
            .count(&self.db)
            .await
            .map_err(storage_error("count account references"))
    }

    async fn purge(&self, plan: &PurgePlan) -> CoreResult<PurgedRows> {
        let key = site_key(plan.site_id)?;
        let mut rows = PurgedRows::default();

        // Dropping `txn` on any early return rolls everything back.
        let txn = self.db.begin().await.map_err(storage_error("begin purge"))?;

        if let Some(account_id) = &plan.purge_account {
            let result = dependent_account::Entity::delete_by_id(account_id.clone())
                .exec(&txn)
                .await
                .map_err(storage_error("delete dependent account"))?;
            rows.account_removed = result.rows_affected > 0;
        }

        rows.posts = post::Entity::delete_many()
            .filter(post::Column::SiteId.eq(key))
            .exec(&txn)
            .await
            .map_err(storage_error("delete posts"))?
            .rows_affected;

        rows.media = media::Entity::delete_many()
            .filter(media::Column::SiteId.eq(key))
            .exec(&txn)
            .await
            .map_err(storage_error("delete media"))?
            .rows_affected;

        rows.settings = site_setting::Entity::delete_many()
            .filter(site_setting::Column::SiteId.eq(key))
            .exec(&txn)
            .await
            .map_err(storage_error("delete settings"))?
            .rows_affected;

        let result = site::Entity::delete_by_id(key)
            .exec(&txn)
            .await
            .map_err(storage_error("delete site"))?;
        rows.site_removed = result.rows_affected > 0;

        txn.commit().await.map_err(storage_error("commit purge"))?;

        log::debug!("Purge of site {} committed: {rows:?}", plan.site_id);
        Ok(rows)
    }
}
