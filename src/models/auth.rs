use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// Un usuario tal como viene de la base de datos.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Usuario {
    pub id: i64,
    pub nombre: String,
    pub apellido: String,
    pub correo: String,
    pub telefono: Option<String>,

    #[serde(skip_serializing)] // Nunca sale en una respuesta
    pub password_hash: String,

    pub is_active: bool,
    pub is_staff: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_modificacion: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Rol {
    pub id: i64,
    pub nombre_rol: String,
}

// Datos para el registro de un nuevo propietario
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegistroPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[validate(email(message = "El correo proporcionado es inválido."))]
    pub correo: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
}

// Datos para login
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "El correo proporcionado es inválido."))]
    pub correo: String,
    #[validate(length(min = 1, message = "La contraseña es obligatoria."))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshPayload {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistroResponse {
    pub mensaje: String,
    pub negocio_id: i64,
}

// Claims del access token. Se recalculan SIEMPRE al emitir (login y refresh):
// cargar roles o negocio viejos desde un token anterior es la clase de bug que
// este diseño evita.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub nombre: String,
    pub correo: String,
    pub roles: Vec<String>,
    // Id del negocio resuelto; 0 es el centinela de alcance de plataforma.
    pub negocio: i64,
    pub exp: usize,
    pub iat: usize,
}

// El refresh token solo lleva identidad. Roles y negocio se resuelven de
// nuevo al canjearlo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: i64,
    pub jti: Uuid,
    pub token_type: String,
    pub exp: usize,
    pub iat: usize,
}
