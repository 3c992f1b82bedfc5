// src/db/cliente_repo.rs
//
// Todas las consultas reciben el filtro de alcance ya resuelto: Some(id) para
// un negocio concreto, None para el alcance de plataforma (SuperAdmin). Un
// registro de otro negocio simplemente no aparece: mismo 404 que si no existiera.

use sqlx::PgPool;

use crate::{common::error::AppError, models::cliente::Cliente};

const COLUMNAS_CLIENTE: &str =
    "id, negocio_id, nombre_cliente, apellido_cliente, correo, telefono, direccion";

#[derive(Clone)]
pub struct ClienteRepository {
    pool: PgPool,
}

impl ClienteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Cliente>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_CLIENTE} FROM clientes \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id"
        );
        let clientes = sqlx::query_as::<_, Cliente>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(clientes)
    }

    pub async fn obtener(&self, id: i64, filtro_negocio: Option<i64>) -> Result<Cliente, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_CLIENTE} FROM clientes \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)"
        );
        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn crear(
        &self,
        negocio_id: i64,
        nombre_cliente: &str,
        apellido_cliente: &str,
        correo: &str,
        telefono: &str,
        direccion: &str,
    ) -> Result<Cliente, AppError> {
        let sql = format!(
            "INSERT INTO clientes \
                (negocio_id, nombre_cliente, apellido_cliente, correo, telefono, direccion) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNAS_CLIENTE}"
        );
        let cliente = sqlx::query_as::<_, Cliente>(&sql)
            .bind(negocio_id)
            .bind(nombre_cliente)
            .bind(apellido_cliente)
            .bind(correo)
            .bind(telefono)
            .bind(direccion)
            .fetch_one(&self.pool)
            .await?;
        Ok(cliente)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        nombre_cliente: Option<&str>,
        apellido_cliente: Option<&str>,
        correo: Option<&str>,
        telefono: Option<&str>,
        direccion: Option<&str>,
    ) -> Result<Cliente, AppError> {
        let sql = format!(
            "UPDATE clientes SET \
                nombre_cliente   = COALESCE($3, nombre_cliente), \
                apellido_cliente = COALESCE($4, apellido_cliente), \
                correo           = COALESCE($5, correo), \
                telefono         = COALESCE($6, telefono), \
                direccion        = COALESCE($7, direccion) \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
             RETURNING {COLUMNAS_CLIENTE}"
        );
        sqlx::query_as::<_, Cliente>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(nombre_cliente)
            .bind(apellido_cliente)
            .bind(correo)
            .bind(telefono)
            .bind(direccion)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, filtro_negocio: Option<i64>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM clientes WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
        )
        .bind(id)
        .bind(filtro_negocio)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NoEncontrado);
        }
        Ok(())
    }
}
