// src/db/caja_repo.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::caja::Caja};

const COLUMNAS_CAJA: &str = "id, negocio_id, fecha_apertura, fecha_cierre, monto_apertura, \
     monto_cierre, observaciones";

#[derive(Clone)]
pub struct CajaRepository {
    pool: PgPool,
}

impl CajaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Caja>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_CAJA} FROM cajas \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id DESC"
        );
        let cajas = sqlx::query_as::<_, Caja>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(cajas)
    }

    pub async fn abrir(
        &self,
        negocio_id: i64,
        fecha_apertura: Option<NaiveDate>,
        monto_apertura: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Caja, AppError> {
        let sql = format!(
            "INSERT INTO cajas (negocio_id, fecha_apertura, monto_apertura, observaciones) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNAS_CAJA}"
        );
        let caja = sqlx::query_as::<_, Caja>(&sql)
            .bind(negocio_id)
            .bind(fecha_apertura.unwrap_or_else(|| Utc::now().date_naive()))
            .bind(monto_apertura)
            .bind(observaciones)
            .fetch_one(&self.pool)
            .await?;
        Ok(caja)
    }

    // Solo se puede cerrar una caja que sigue abierta.
    pub async fn cerrar(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        fecha_cierre: Option<NaiveDate>,
        monto_cierre: Decimal,
        observaciones: Option<&str>,
    ) -> Result<Caja, AppError> {
        let sql = format!(
            "UPDATE cajas SET \
                fecha_cierre  = $3, \
                monto_cierre  = $4, \
                observaciones = COALESCE($5, observaciones) \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
               AND fecha_cierre IS NULL \
             RETURNING {COLUMNAS_CAJA}"
        );
        sqlx::query_as::<_, Caja>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(fecha_cierre.unwrap_or_else(|| Utc::now().date_naive()))
            .bind(monto_cierre)
            .bind(observaciones)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }
}
