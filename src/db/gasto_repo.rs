// src/db/gasto_repo.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::gasto::Gasto};

const COLUMNAS_GASTO: &str = "id, negocio_id, descripcion, monto, fecha";

#[derive(Clone)]
pub struct GastoRepository {
    pool: PgPool,
}

impl GastoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Gasto>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_GASTO} FROM gastos \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id"
        );
        let gastos = sqlx::query_as::<_, Gasto>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(gastos)
    }

    pub async fn obtener(&self, id: i64, filtro_negocio: Option<i64>) -> Result<Gasto, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_GASTO} FROM gastos \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)"
        );
        sqlx::query_as::<_, Gasto>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn crear(
        &self,
        negocio_id: i64,
        descripcion: &str,
        monto: Decimal,
        fecha: Option<NaiveDate>,
    ) -> Result<Gasto, AppError> {
        let sql = format!(
            "INSERT INTO gastos (negocio_id, descripcion, monto, fecha) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNAS_GASTO}"
        );
        let gasto = sqlx::query_as::<_, Gasto>(&sql)
            .bind(negocio_id)
            .bind(descripcion)
            .bind(monto)
            .bind(fecha.unwrap_or_else(|| Utc::now().date_naive()))
            .fetch_one(&self.pool)
            .await?;
        Ok(gasto)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        descripcion: Option<&str>,
        monto: Option<Decimal>,
        fecha: Option<NaiveDate>,
    ) -> Result<Gasto, AppError> {
        let sql = format!(
            "UPDATE gastos SET \
                descripcion = COALESCE($3, descripcion), \
                monto       = COALESCE($4, monto), \
                fecha       = COALESCE($5, fecha) \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
             RETURNING {COLUMNAS_GASTO}"
        );
        sqlx::query_as::<_, Gasto>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(descripcion)
            .bind(monto)
            .bind(fecha)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, filtro_negocio: Option<i64>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM gastos WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
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
