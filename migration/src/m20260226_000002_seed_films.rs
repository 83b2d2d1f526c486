use sea_orm_migration::prelude::*;

use crate::catalog::{EntityKind, Films, SEED_FILMS};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in EntityKind::ALL {
            if let Some(seed) = kind.config()?.seed {
                manager.exec_stmt(seed).await?;
            }
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Films::Table)
                    .and_where(Expr::col(Films::Id).is_in(SEED_FILMS.iter().map(|f| f.id)))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
