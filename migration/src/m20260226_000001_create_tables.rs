use sea_orm_migration::prelude::*;

use crate::catalog::EntityKind;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in EntityKind::ALL {
            let config = kind.config()?;
            manager.create_table(config.table).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for kind in EntityKind::ALL.into_iter().rev() {
            let config = kind.config()?;
            manager.drop_table(config.drop).await?;
        }
        Ok(())
    }
}
