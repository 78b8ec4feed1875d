//! Embedded PostgreSQL helpers shared by database-backed integration tests.
//!
//! Each test receives its own database cloned from an empty template on the
//! shared embedded cluster. Schema setup is left to the caller so the
//! service's own migrations are exercised.

use std::sync::{Mutex, OnceLock};

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use uuid::Uuid;

const TEMPLATE_NAME: &str = "users_api_template";

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Returns true when `SKIP_TEST_CLUSTER` is set to "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is truthy, otherwise fail.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn ensure_template(cluster: &ClusterHandle) -> Result<(), String> {
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());
    let exists = cluster
        .database_exists(TEMPLATE_NAME)
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(TEMPLATE_NAME)
            .map_err(|err| format!("create template: {err:?}"))?;
    }
    Ok(())
}

/// Provision an empty, uniquely named database on the shared cluster.
///
/// The database is dropped when the returned handle goes out of scope.
pub fn provision_empty_database() -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("cluster: {err:?}"))?;
    ensure_template(cluster)?;
    let name = format!("test_{}", Uuid::new_v4().simple());
    cluster
        .temporary_database_from_template(name.as_str(), TEMPLATE_NAME)
        .map_err(|err| format!("create database {name}: {err:?}"))
}
