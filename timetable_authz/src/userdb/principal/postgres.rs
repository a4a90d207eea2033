use sqlx::{Pool, Postgres};

use crate::storage::DB_TABLE_PRINCIPALS;
use crate::userdb::{
    errors::PrincipalError,
    types::{Principal, PrincipalRow},
};

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), PrincipalError> {
    let table_name = DB_TABLE_PRINCIPALS.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id TEXT PRIMARY KEY NOT NULL,
            account TEXT NOT NULL,
            label TEXT NOT NULL,
            role TEXT NOT NULL,
            department_id TEXT,
            status TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#,
        table_name
    ))
    .execute(pool)
    .await
    .map_err(|e| PrincipalError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_principal_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<Principal>, PrincipalError> {
    let table_name = DB_TABLE_PRINCIPALS.as_str();

    let row = sqlx::query_as::<_, PrincipalRow>(&format!(
        r#"
        SELECT * FROM {} WHERE id = $1
        "#,
        table_name
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| PrincipalError::Storage(e.to_string()))?;

    row.map(Principal::try_from).transpose()
}

pub(super) async fn upsert_principal_postgres(
    pool: &Pool<Postgres>,
    principal: Principal,
) -> Result<Principal, PrincipalError> {
    let table_name = DB_TABLE_PRINCIPALS.as_str();

    sqlx::query(&format!(
        r#"
        INSERT INTO {} (id, account, label, role, department_id, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO UPDATE SET
            account = excluded.account,
            label = excluded.label,
            role = excluded.role,
            department_id = excluded.department_id,
            status = excluded.status,
            updated_at = excluded.updated_at
        "#,
        table_name
    ))
    .bind(&principal.id)
    .bind(&principal.account)
    .bind(&principal.label)
    .bind(principal.role.as_str())
    .bind(&principal.department_id)
    .bind(principal.status.as_str())
    .bind(principal.created_at)
    .bind(principal.updated_at)
    .execute(pool)
    .await
    .map_err(|e| PrincipalError::Storage(e.to_string()))?;

    Ok(principal)
}

pub(super) async fn delete_principal_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<(), PrincipalError> {
    let table_name = DB_TABLE_PRINCIPALS.as_str();

    sqlx::query(&format!(
        r#"
        DELETE FROM {} WHERE id = $1
        "#,
        table_name
    ))
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| PrincipalError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_all_principals_postgres(
    pool: &Pool<Postgres>,
) -> Result<Vec<Principal>, PrincipalError> {
    let table_name = DB_TABLE_PRINCIPALS.as_str();

    let rows = sqlx::query_as::<_, PrincipalRow>(&format!(
        r#"
        SELECT * FROM {} ORDER BY id
        "#,
        table_name
    ))
    .fetch_all(pool)
    .await
    .map_err(|e| PrincipalError::Storage(e.to_string()))?;

    rows.into_iter().map(Principal::try_from).collect()
}
