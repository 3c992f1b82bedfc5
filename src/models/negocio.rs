use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TipoNegocio {
    pub id: i64,
    pub nombre_tipo_negocio: String,
    pub descripcion: String,
}

// Un negocio es el tenant del sistema: todo registro de dominio le pertenece.
// propietario_id es nullable: borrar al dueño no borra el negocio.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Negocio {
    pub id: i64,
    pub nombre_negocio: String,
    pub direccion: String,
    pub telefono: String,
    pub correo: String,
    pub fecha_creacion: NaiveDate,
    pub tipo_negocio_id: Option<i64>,
    pub propietario_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarNegocioPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre_negocio: Option<String>,
    pub direccion: Option<String>,
    pub telefono: Option<String>,
    #[validate(email(message = "El correo proporcionado es inválido."))]
    pub correo: Option<String>,
    pub tipo_negocio_id: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearTipoNegocioPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre_tipo_negocio: String,
    #[serde(default)]
    pub descripcion: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarTipoNegocioPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre_tipo_negocio: Option<String>,
    pub descripcion: Option<String>,
}
