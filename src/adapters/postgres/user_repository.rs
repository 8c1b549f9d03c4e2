//! PostgreSQL implementation of UserRepository.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::{Provider, User};
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let proveedor: String = row.get("proveedor");
    let proveedor = proveedor.parse::<Provider>().map_err(|_| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Unknown provider stored for user: {}", proveedor),
        )
    })?;
    Ok(User {
        id: UserId::new(row.get::<i64, _>("id")),
        nombre: row.get("nombre"),
        correo: row.get("correo"),
        proveedor,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_correo(
        &self,
        correo: &str,
        proveedor: Option<Provider>,
    ) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, nombre, correo, proveedor
            FROM usuarios
            WHERE correo = $1 AND ($2::text IS NULL OR proveedor = $2)
            "#,
        )
        .bind(correo)
        .bind(proveedor.map(|p| p.as_str()))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query user: {}", e),
            )
        })?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn password_hash(&self, correo: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT password_hash
            FROM usuarios
            WHERE correo = $1 AND proveedor = 'local'
            "#,
        )
        .bind(correo)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query password hash: {}", e),
            )
        })?;

        Ok(row.and_then(|r| r.get::<Option<String>, _>("password_hash")))
    }

    async fn create(
        &self,
        nombre: &str,
        correo: &str,
        proveedor: Provider,
        password_hash: Option<&str>,
    ) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO usuarios (nombre, correo, proveedor, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(nombre)
        .bind(correo)
        .bind(proveedor.as_str())
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::new(ErrorCode::DuplicateUser, "Email already registered")
                    .with_detail("correo", correo)
            }
            _ => DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert user: {}", e),
            ),
        })?;

        Ok(User {
            id: UserId::new(row.get::<i64, _>("id")),
            nombre: nombre.to_string(),
            correo: correo.to_string(),
            proveedor,
        })
    }
}
