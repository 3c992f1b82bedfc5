use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Cliente {
    pub id: i64,
    pub negocio_id: i64,
    pub nombre_cliente: String,
    pub apellido_cliente: String,
    pub correo: String,
    pub telefono: String,
    pub direccion: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearClientePayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre_cliente: String,
    #[serde(default)]
    pub apellido_cliente: String,
    #[serde(default)]
    pub correo: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub direccion: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarClientePayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre_cliente: Option<String>,
    pub apellido_cliente: Option<String>,
    pub correo: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
}
