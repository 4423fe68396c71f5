pub use sea_orm_migration::prelude::*;

mod m20251020_000001_create_customer;
mod m20251020_000002_create_log_message;
mod m20251020_000003_create_invoice;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_create_customer::Migration),
            Box::new(m20251020_000002_create_log_message::Migration),
            Box::new(m20251020_000003_create_invoice::Migration),
        ]
    }
}
