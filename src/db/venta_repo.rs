// src/db/venta_repo.rs

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::venta::{Pago, Venta, VentaProducto},
};

const COLUMNAS_VENTA: &str = "id, negocio_id, fecha_venta, total_venta, estado";

#[derive(Clone)]
pub struct VentaRepository {
    pool: PgPool,
}

impl VentaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Venta>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_VENTA} FROM ventas \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id"
        );
        let ventas = sqlx::query_as::<_, Venta>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(ventas)
    }

    pub async fn obtener(&self, id: i64, filtro_negocio: Option<i64>) -> Result<Venta, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_VENTA} FROM ventas \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)"
        );
        sqlx::query_as::<_, Venta>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn renglones_de_venta(&self, venta_id: i64) -> Result<Vec<VentaProducto>, AppError> {
        let renglones = sqlx::query_as::<_, VentaProducto>(
            "SELECT id, venta_id, producto_id, cantidad, precio_venta_unitario \
             FROM venta_productos WHERE venta_id = $1 ORDER BY id",
        )
        .bind(venta_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(renglones)
    }

    // Alta de venta con sus renglones en una sola transacción. El total se
    // calcula acá: cantidad * precio unitario de cada renglón. Además descuenta
    // stock de cada producto vendido, verificando que pertenezca al negocio.
    pub async fn crear_venta(
        &self,
        negocio_id: i64,
        fecha_venta: Option<NaiveDate>,
        estado: &str,
        renglones: &[(i64, i32, Decimal)],
    ) -> Result<Venta, AppError> {
        let fecha = fecha_venta.unwrap_or_else(|| Utc::now().date_naive());
        let total: Decimal = renglones
            .iter()
            .map(|(_, cantidad, precio)| Decimal::from(*cantidad) * *precio)
            .sum();

        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "INSERT INTO ventas (negocio_id, fecha_venta, total_venta, estado) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNAS_VENTA}"
        );
        let venta = sqlx::query_as::<_, Venta>(&sql)
            .bind(negocio_id)
            .bind(fecha)
            .bind(total)
            .bind(estado)
            .fetch_one(&mut *tx)
            .await?;

        for (producto_id, cantidad, precio) in renglones {
            // El producto tiene que ser del mismo negocio que la venta y
            // tener stock para cubrir el renglón.
            let actualizado = sqlx::query(
                "UPDATE productos SET stock_actual = stock_actual - $2 \
                 WHERE id = $1 AND negocio_id = $3 AND stock_actual >= $2",
            )
            .bind(producto_id)
            .bind(cantidad)
            .bind(negocio_id)
            .execute(&mut *tx)
            .await?;

            if actualizado.rows_affected() == 0 {
                // Rollback implícito al soltar la transacción. Producto ajeno
                // o inexistente es 404; producto del negocio sin stock es 409.
                let existe: Option<(i64,)> = sqlx::query_as(
                    "SELECT id FROM productos WHERE id = $1 AND negocio_id = $2",
                )
                .bind(producto_id)
                .bind(negocio_id)
                .fetch_optional(&mut *tx)
                .await?;
                return match existe {
                    Some(_) => Err(AppError::StockInsuficiente),
                    None => Err(AppError::NoEncontrado),
                };
            }

            sqlx::query(
                "INSERT INTO venta_productos (venta_id, producto_id, cantidad, precio_venta_unitario) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(venta.id)
            .bind(producto_id)
            .bind(cantidad)
            .bind(precio)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(venta)
    }

    pub async fn actualizar_estado(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        estado: &str,
    ) -> Result<Venta, AppError> {
        let sql = format!(
            "UPDATE ventas SET estado = $3 \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
             RETURNING {COLUMNAS_VENTA}"
        );
        sqlx::query_as::<_, Venta>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(estado)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, filtro_negocio: Option<i64>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM ventas WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
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

    // ------------------------------------------------------------------
    // Pagos de una venta
    // ------------------------------------------------------------------

    pub async fn crear_pago(
        &self,
        venta_id: i64,
        fecha_pago: Option<NaiveDate>,
        monto_pago: Decimal,
        metodo_pago: &str,
    ) -> Result<Pago, AppError> {
        let fecha = fecha_pago.unwrap_or_else(|| Utc::now().date_naive());
        let pago = sqlx::query_as::<_, Pago>(
            "INSERT INTO pagos (venta_id, fecha_pago, monto_pago, metodo_pago) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, venta_id, fecha_pago, monto_pago, metodo_pago",
        )
        .bind(venta_id)
        .bind(fecha)
        .bind(monto_pago)
        .bind(metodo_pago)
        .fetch_one(&self.pool)
        .await?;
        Ok(pago)
    }

    pub async fn pagos_de_venta(&self, venta_id: i64) -> Result<Vec<Pago>, AppError> {
        let pagos = sqlx::query_as::<_, Pago>(
            "SELECT id, venta_id, fecha_pago, monto_pago, metodo_pago \
             FROM pagos WHERE venta_id = $1 ORDER BY id",
        )
        .bind(venta_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pagos)
    }
}
