use crate::storage::GENERIC_DATA_STORE;
use crate::userdb::{errors::PrincipalError, types::Principal};

use super::postgres::*;
use super::sqlite::*;

pub struct PrincipalStore;

impl PrincipalStore {
    /// Initialize the principal directory table
    pub async fn init() -> Result<(), PrincipalError> {
        let store = GENERIC_DATA_STORE.lock().await;

        match (store.as_sqlite(), store.as_postgres()) {
            (Some(pool), _) => create_tables_sqlite(pool).await,
            (_, Some(pool)) => create_tables_postgres(pool).await,
            _ => Err(PrincipalError::Storage(
                "Unsupported database type".to_string(),
            )),
        }
    }

    /// Get a principal by their ID
    pub async fn get_principal(id: &str) -> Result<Option<Principal>, PrincipalError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_principal_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            get_principal_postgres(pool, id).await
        } else {
            Err(PrincipalError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// Create or update a principal
    pub async fn upsert_principal(principal: Principal) -> Result<Principal, PrincipalError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            upsert_principal_sqlite(pool, principal).await
        } else if let Some(pool) = store.as_postgres() {
            upsert_principal_postgres(pool, principal).await
        } else {
            Err(PrincipalError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    pub async fn delete_principal(id: &str) -> Result<(), PrincipalError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            delete_principal_sqlite(pool, id).await
        } else if let Some(pool) = store.as_postgres() {
            delete_principal_postgres(pool, id).await
        } else {
            Err(PrincipalError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }

    /// List every principal in the directory (admin dashboards)
    pub async fn get_all_principals() -> Result<Vec<Principal>, PrincipalError> {
        let store = GENERIC_DATA_STORE.lock().await;

        if let Some(pool) = store.as_sqlite() {
            get_all_principals_sqlite(pool).await
        } else if let Some(pool) = store.as_postgres() {
            get_all_principals_postgres(pool).await
        } else {
            Err(PrincipalError::Storage(
                "Unsupported database type".to_string(),
            ))
        }
    }
}
