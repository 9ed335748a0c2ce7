use std::fs;
use std::sync::Arc;

use revenue_core::db::{self, DbPool};
use uuid::Uuid;

pub fn setup_test_pool(test_id: &str) -> (Arc<DbPool>, String) {
    fs::create_dir_all("./tests/output").expect("Failed to create test output directory");

    let db_path = format!(
        "./tests/output/{}-{}.db",
        test_id,
        Uuid::new_v4().simple()
    );

    db::init(&db_path).expect("Failed to initialize database");
    let pool = db::create_pool(&db_path).expect("Failed to create database pool");
    db::run_migrations(&pool).expect("Failed to run migrations");

    (pool, db_path)
}

pub fn teardown(db_path: &str) {
    let _ = fs::remove_file(db_path);
    let _ = fs::remove_file(format!("{}-wal", db_path));
    let _ = fs::remove_file(format!("{}-shm", db_path));
}
