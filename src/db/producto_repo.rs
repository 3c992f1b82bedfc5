// src/db/producto_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::producto::{CategoriaProducto, Producto, TipoProducto},
};

const COLUMNAS_PRODUCTO: &str = "id, negocio_id, nombre_producto, descripcion, stock_actual, \
     stock_min, stock_max, unidad_medida, precio_venta, categoria_id, tipo_id";

#[derive(Clone)]
pub struct ProductoRepository {
    pool: PgPool,
}

impl ProductoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Producto>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_PRODUCTO} FROM productos \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id"
        );
        let productos = sqlx::query_as::<_, Producto>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(productos)
    }

    pub async fn obtener(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
    ) -> Result<Producto, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_PRODUCTO} FROM productos \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)"
        );
        sqlx::query_as::<_, Producto>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn crear(
        &self,
        negocio_id: i64,
        nombre_producto: &str,
        descripcion: &str,
        stock_actual: i32,
        stock_min: i32,
        stock_max: i32,
        unidad_medida: &str,
        precio_venta: Decimal,
        categoria_id: Option<i64>,
        tipo_id: Option<i64>,
    ) -> Result<Producto, AppError> {
        let sql = format!(
            "INSERT INTO productos \
                (negocio_id, nombre_producto, descripcion, stock_actual, stock_min, stock_max, \
                 unidad_medida, precio_venta, categoria_id, tipo_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {COLUMNAS_PRODUCTO}"
        );
        let producto = sqlx::query_as::<_, Producto>(&sql)
            .bind(negocio_id)
            .bind(nombre_producto)
            .bind(descripcion)
            .bind(stock_actual)
            .bind(stock_min)
            .bind(stock_max)
            .bind(unidad_medida)
            .bind(precio_venta)
            .bind(categoria_id)
            .bind(tipo_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(producto)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn actualizar(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        nombre_producto: Option<&str>,
        descripcion: Option<&str>,
        stock_actual: Option<i32>,
        stock_min: Option<i32>,
        stock_max: Option<i32>,
        unidad_medida: Option<&str>,
        precio_venta: Option<Decimal>,
        categoria_id: Option<i64>,
        tipo_id: Option<i64>,
    ) -> Result<Producto, AppError> {
        let sql = format!(
            "UPDATE productos SET \
                nombre_producto = COALESCE($3, nombre_producto), \
                descripcion     = COALESCE($4, descripcion), \
                stock_actual    = COALESCE($5, stock_actual), \
                stock_min       = COALESCE($6, stock_min), \
                stock_max       = COALESCE($7, stock_max), \
                unidad_medida   = COALESCE($8, unidad_medida), \
                precio_venta    = COALESCE($9, precio_venta), \
                categoria_id    = COALESCE($10, categoria_id), \
                tipo_id         = COALESCE($11, tipo_id) \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
             RETURNING {COLUMNAS_PRODUCTO}"
        );
        sqlx::query_as::<_, Producto>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(nombre_producto)
            .bind(descripcion)
            .bind(stock_actual)
            .bind(stock_min)
            .bind(stock_max)
            .bind(unidad_medida)
            .bind(precio_venta)
            .bind(categoria_id)
            .bind(tipo_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, filtro_negocio: Option<i64>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM productos WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
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
    // Catálogos por negocio: categorías y tipos de producto.
    // ------------------------------------------------------------------

    pub async fn crear_categoria(
        &self,
        negocio_id: i64,
        nombre_categoria: &str,
    ) -> Result<CategoriaProducto, AppError> {
        let categoria = sqlx::query_as::<_, CategoriaProducto>(
            "INSERT INTO categorias_producto (negocio_id, nombre_categoria) \
             VALUES ($1, $2) \
             RETURNING id, negocio_id, nombre_categoria",
        )
        .bind(negocio_id)
        .bind(nombre_categoria)
        .fetch_one(&self.pool)
        .await?;
        Ok(categoria)
    }

    pub async fn listar_categorias(
        &self,
        filtro_negocio: Option<i64>,
    ) -> Result<Vec<CategoriaProducto>, AppError> {
        let categorias = sqlx::query_as::<_, CategoriaProducto>(
            "SELECT id, negocio_id, nombre_categoria FROM categorias_producto \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id",
        )
        .bind(filtro_negocio)
        .fetch_all(&self.pool)
        .await?;
        Ok(categorias)
    }

    pub async fn eliminar_categoria(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM categorias_producto \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
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

    pub async fn crear_tipo_producto(
        &self,
        negocio_id: i64,
        nombre_tipo_producto: &str,
    ) -> Result<TipoProducto, AppError> {
        let tipo = sqlx::query_as::<_, TipoProducto>(
            "INSERT INTO tipos_producto (negocio_id, nombre_tipo_producto) \
             VALUES ($1, $2) \
             RETURNING id, negocio_id, nombre_tipo_producto",
        )
        .bind(negocio_id)
        .bind(nombre_tipo_producto)
        .fetch_one(&self.pool)
        .await?;
        Ok(tipo)
    }

    pub async fn listar_tipos_producto(
        &self,
        filtro_negocio: Option<i64>,
    ) -> Result<Vec<TipoProducto>, AppError> {
        let tipos = sqlx::query_as::<_, TipoProducto>(
            "SELECT id, negocio_id, nombre_tipo_producto FROM tipos_producto \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id",
        )
        .bind(filtro_negocio)
        .fetch_all(&self.pool)
        .await?;
        Ok(tipos)
    }

    pub async fn eliminar_tipo_producto(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM tipos_producto \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
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
