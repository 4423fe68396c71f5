use axum::{
    body::Body,
    http::{header, Request, Response},
};
use cmt_quickstart::{
    config::{Config, DEFAULT_MAX_CONNECTIONS},
    db, AppState,
};
use sea_orm::{DatabaseConnection, DbErr};
use tempfile::TempDir;

/// A migrated database in a throwaway directory
///
/// The directory is removed when this is dropped, so keep it alive for the
/// whole test.
pub struct TestDb {
    pub db: DatabaseConnection,
    pub config: Config,
    _dir: TempDir,
}

/// Set up test database connection
/// Uses a fresh SQLite file per test so tests never see each other's rows
pub async fn setup_test_db() -> Result<TestDb, DbErr> {
    setup_test_db_with_pool(DEFAULT_MAX_CONNECTIONS).await
}

#[allow(dead_code)]
pub async fn setup_test_db_with_pool(max_connections: u32) -> Result<TestDb, DbErr> {
    let dir = tempfile::tempdir().map_err(|e| DbErr::Custom(e.to_string()))?;
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("cmt-test.db").display());
    let pool_size = max_connections.to_string();

    let config = Config::from_lookup(move |key: &str| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DB_MAX_CONNECTIONS" => Some(pool_size.clone()),
        _ => None,
    })
    .map_err(|e| DbErr::Custom(e.to_string()))?;

    let db = db::connect_and_migrate(&config).await?;
    Ok(TestDb {
        db,
        config,
        _dir: dir,
    })
}

#[allow(dead_code)]
pub async fn setup_test_state() -> (AppState, TestDb) {
    let test_db = setup_test_db().await.expect("Failed to set up test DB");
    let state = AppState::new(test_db.db.clone(), test_db.config.max_connections)
        .expect("Failed to load templates");
    (state, test_db)
}

/// POST /customers/addCustomer with an already url-encoded form body
#[allow(dead_code)]
pub fn add_customer_request(form_body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/customers/addCustomer")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database connection should succeed");
    }
}
