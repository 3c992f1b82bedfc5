// src/db/user_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::auth::Usuario};

const COLUMNAS_USUARIO: &str = "id, nombre, apellido, correo, telefono, password_hash, \
     is_active, is_staff, fecha_creacion, fecha_modificacion";

// Repositorio de usuarios: toda interacción con la tabla 'usuarios' pasa por acá.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn buscar_por_correo(&self, correo: &str) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUMNAS_USUARIO} FROM usuarios WHERE correo = $1");
        let maybe_usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(correo)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_usuario)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUMNAS_USUARIO} FROM usuarios WHERE id = $1");
        let maybe_usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_usuario)
    }

    // Crea un usuario SIN rol: la membresía de rol la agrega el flujo que lo
    // llama (registro o alta de empleado), dentro de la misma transacción.
    pub async fn crear_usuario<'e, E>(
        &self,
        executor: E,
        nombre: &str,
        apellido: &str,
        correo: &str,
        telefono: Option<&str>,
        password_hash: &str,
    ) -> Result<Usuario, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO usuarios (nombre, apellido, correo, telefono, password_hash) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNAS_USUARIO}"
        );
        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(nombre)
            .bind(apellido)
            .bind(correo)
            .bind(telefono)
            .bind(password_hash)
            .fetch_one(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    // El índice único sobre 'correo' es el handle de autenticación.
                    if db_err.is_unique_violation() {
                        return AppError::CorreoYaRegistrado;
                    }
                }
                e.into()
            })?;

        Ok(usuario)
    }
}
