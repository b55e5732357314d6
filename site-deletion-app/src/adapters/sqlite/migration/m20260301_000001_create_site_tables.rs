use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // dependent_accounts
        manager
            .create_table(
                Table::create()
                    .table(DependentAccount::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DependentAccount::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DependentAccount::Username).string().not_null())
                    .col(ColumnDef::new(DependentAccount::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // sites
        manager
            .create_table(
                Table::create()
                    .table(Site::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Site::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Site::Name).string().not_null())
                    .col(ColumnDef::new(Site::Url).string().not_null())
                    .col(
                        ColumnDef::new(Site::IsAdmin)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Site::IsHostedOnPlatform)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Site::DependentAccountId).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sites_dependent_account")
                    .table(Site::Table)
                    .col(Site::DependentAccountId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // posts
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Post::SiteId).big_integer().not_null())
                    .col(ColumnDef::new(Post::Id).big_integer().not_null())
                    .col(ColumnDef::new(Post::Title).string().not_null())
                    .primary_key(Index::create().col(Post::SiteId).col(Post::Id))
                    .to_owned(),
            )
            .await?;

        // media
        manager
            .create_table(
                Table::create()
                    .table(Media::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Media::SiteId).big_integer().not_null())
                    .col(ColumnDef::new(Media::Id).big_integer().not_null())
                    .col(ColumnDef::new(Media::RemoteUrl).string().not_null())
                    .primary_key(Index::create().col(Media::SiteId).col(Media::Id))
                    .to_owned(),
            )
            .await?;

        // site_settings
        manager
            .create_table(
                Table::create()
                    .table(SiteSetting::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SiteSetting::SiteId).big_integer().not_null())
                    .col(ColumnDef::new(SiteSetting::Key).string().not_null())
                    .col(ColumnDef::new(SiteSetting::Value).string().not_null())
                    .primary_key(
                        Index::create()
                            .col(SiteSetting::SiteId)
                            .col(SiteSetting::Key),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SiteSetting::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Media::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Site::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DependentAccount::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum DependentAccount {
    #[sea_orm(iden = "dependent_accounts")]
    Table,
    Id,
    Username,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Site {
    #[sea_orm(iden = "sites")]
    Table,
    Id,
    Name,
    Url,
    IsAdmin,
    IsHostedOnPlatform,
    DependentAccountId,
}

#[derive(DeriveIden)]
enum Post {
    #[sea_orm(iden = "posts")]
    Table,
    SiteId,
    Id,
    Title,
}

#[derive(DeriveIden)]
enum Media {
    #[sea_orm(iden = "media")]
    Table,
    SiteId,
    Id,
    RemoteUrl,
}

#[derive(DeriveIden)]
enum SiteSetting {
    #[sea_orm(iden = "site_settings")]
    Table,
    SiteId,
    Key,
    Value,
}
