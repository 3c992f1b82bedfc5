use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CategoriaProducto {
    pub id: i64,
    pub negocio_id: i64,
    pub nombre_categoria: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TipoProducto {
    pub id: i64,
    pub negocio_id: i64,
    pub nombre_tipo_producto: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Producto {
    pub id: i64,
    pub negocio_id: i64,
    pub nombre_producto: String,
    pub descripcion: String,
    pub stock_actual: i32,
    pub stock_min: i32,
    pub stock_max: i32,
    pub unidad_medida: String,
    pub precio_venta: Decimal,
    pub categoria_id: Option<i64>,
    pub tipo_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearProductoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre_producto: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default)]
    pub stock_actual: i32,
    #[serde(default)]
    pub stock_min: i32,
    #[serde(default)]
    pub stock_max: i32,
    #[serde(default)]
    pub unidad_medida: String,
    pub precio_venta: Decimal,
    pub categoria_id: Option<i64>,
    pub tipo_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarProductoPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre_producto: Option<String>,
    pub descripcion: Option<String>,
    pub stock_actual: Option<i32>,
    pub stock_min: Option<i32>,
    pub stock_max: Option<i32>,
    pub unidad_medida: Option<String>,
    pub precio_venta: Option<Decimal>,
    pub categoria_id: Option<i64>,
    pub tipo_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearCategoriaPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre_categoria: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearTipoProductoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre_tipo_producto: String,
}
