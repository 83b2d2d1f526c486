pub use sea_orm_migration::prelude::*;

pub mod catalog;
mod m20260226_000001_create_tables;
mod m20260226_000002_seed_films;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260226_000001_create_tables::Migration),
            Box::new(m20260226_000002_seed_films::Migration),
        ]
    }
}
