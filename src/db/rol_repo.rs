// src/db/rol_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::auth::Rol};

// Repositorio de roles y membresías usuario <-> rol.
#[derive(Clone)]
pub struct RolRepository {
    pool: PgPool,
}

impl RolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Idempotente: si el rol ya existe lo devuelve tal cual. El nombre llega
    // ya normalizado (mayúsculas) desde el registro de roles.
    pub async fn get_or_create<'e, E>(&self, executor: E, nombre_rol: &str) -> Result<Rol, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rol = sqlx::query_as::<_, Rol>(
            "INSERT INTO roles (nombre_rol) VALUES ($1) \
             ON CONFLICT (nombre_rol) DO UPDATE SET nombre_rol = EXCLUDED.nombre_rol \
             RETURNING id, nombre_rol",
        )
        .bind(nombre_rol)
        .fetch_one(executor)
        .await?;

        Ok(rol)
    }

    pub async fn roles_de_usuario(&self, usuario_id: i64) -> Result<Vec<String>, AppError> {
        let roles: Vec<(String,)> = sqlx::query_as(
            "SELECT r.nombre_rol \
             FROM usuario_roles ur \
             JOIN roles r ON r.id = ur.rol_id \
             WHERE ur.usuario_id = $1 \
             ORDER BY r.nombre_rol",
        )
        .bind(usuario_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(roles.into_iter().map(|(nombre,)| nombre).collect())
    }

    pub async fn asignar_rol<'e, E>(
        &self,
        executor: E,
        usuario_id: i64,
        rol_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO usuario_roles (usuario_id, rol_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(usuario_id)
        .bind(rol_id)
        .execute(executor)
        .await?;

        Ok(())
    }

    // Quitar un rol borra SOLO la membresía; el rol es dato de referencia
    // compartido y nunca se borra desde acá.
    pub async fn quitar_rol(&self, usuario_id: i64, rol_id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM usuario_roles WHERE usuario_id = $1 AND rol_id = $2")
            .bind(usuario_id)
            .bind(rol_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
