use sea_orm::DatabaseConnection;
use services::customer_manager::CustomerManager;
use tx::TransactionManager;
use views::Views;

#[derive(Clone)]
pub struct AppState {
    pub customers: CustomerManager,
    pub views: Views,
}

impl AppState {
    /// `max_connections` must match the pool `db` was opened with
    pub fn new(db: DatabaseConnection, max_connections: u32) -> Result<Self, minijinja::Error> {
        let tx = TransactionManager::new(db, max_connections);
        Ok(Self {
            customers: CustomerManager::new(tx),
            views: Views::new()?,
        })
    }
}

pub mod entities;

pub mod models {
    pub mod customer;
}

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod tx;
pub mod views;
