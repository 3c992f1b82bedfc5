use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Proveedor {
    pub id: i64,
    pub negocio_id: i64,
    pub nombre: String,
    pub telefono: String,
    pub correo: String,
    pub direccion: String,
    pub tipo_proveedor: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearProveedorPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub tipo_proveedor: String,
    // Productos que surte este proveedor (ids, opcional)
    #[serde(default)]
    pub productos: Vec<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarProveedorPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre: Option<String>,
    pub telefono: Option<String>,
    pub correo: Option<String>,
    pub direccion: Option<String>,
    pub tipo_proveedor: Option<String>,
}
