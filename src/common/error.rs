use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// El tipo de error único de la aplicación. Cada variante sabe a qué código
// HTTP se traduce; el detalle interno se loguea, al cliente le llega un
// mensaje genérico.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de validación")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("El correo ya está registrado")]
    CorreoYaRegistrado,

    // Mensaje único para correo inexistente y contraseña incorrecta: la
    // respuesta no debe revelar si el correo existe.
    #[error("Credenciales inválidas")]
    CredencialesInvalidas,

    #[error("Token inválido")]
    TokenInvalido,

    // Los roles del usuario no alcanzan para resolver un negocio (Admin sin
    // negocio propio, empleado sin registro de empleo). Es una señal de datos
    // mal aprovisionados, no un caso de negocio recuperable.
    #[error("No se pudo resolver el negocio del usuario: {0}")]
    ResolucionDeNegocio(String),

    // El detalle queda en los logs; el cliente recibe un mensaje genérico.
    #[error("Acceso denegado: {0}")]
    AccesoDenegado(String),

    // Se devuelve el mismo 404 para un recurso inexistente y para uno de otro
    // negocio, para no filtrar existencia entre tenants.
    #[error("Recurso no encontrado")]
    NoEncontrado,

    // Un renglón de venta pide más unidades de las que hay. Lo detecta el
    // UPDATE guardado por stock_actual, dentro de la misma transacción.
    #[error("Stock insuficiente")]
    StockInsuficiente,

    #[error("Error de base de datos")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Error interno del servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Error de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Error de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Devolvemos el detalle campo por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Uno o más campos son inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::CorreoYaRegistrado => {
                (StatusCode::BAD_REQUEST, "Este correo ya está en uso.")
            }
            AppError::CredencialesInvalidas => {
                (StatusCode::UNAUTHORIZED, "Correo o contraseña inválidos.")
            }
            AppError::TokenInvalido => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticación inválido o ausente.",
            ),
            AppError::ResolucionDeNegocio(ref detalle) => {
                // Señal de integridad de datos: alguien quedó mal aprovisionado.
                tracing::warn!("Fallo de resolución de negocio: {}", detalle);
                (
                    StatusCode::UNAUTHORIZED,
                    "La cuenta no tiene un negocio asociado.",
                )
            }
            AppError::AccesoDenegado(ref detalle) => {
                tracing::warn!("Acceso denegado: {}", detalle);
                (
                    StatusCode::FORBIDDEN,
                    "No tienes permiso para realizar esta acción.",
                )
            }
            AppError::NoEncontrado => (StatusCode::NOT_FOUND, "Recurso no encontrado."),
            AppError::StockInsuficiente => (
                StatusCode::CONFLICT,
                "Stock insuficiente para completar la venta.",
            ),

            // Todo lo demás (DatabaseError, InternalServerError, etc.) es un
            // 500: se loguea el detalle y el cliente recibe un mensaje opaco.
            ref e => {
                tracing::error!("Error interno del servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error inesperado.",
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credenciales_invalidas_es_401() {
        let resp = AppError::CredencialesInvalidas.into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn no_encontrado_es_404() {
        let resp = AppError::NoEncontrado.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn acceso_denegado_es_403() {
        let resp = AppError::AccesoDenegado("rol insuficiente".into()).into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn stock_insuficiente_es_409() {
        let resp = AppError::StockInsuficiente.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn resolucion_de_negocio_es_401() {
        let resp = AppError::ResolucionDeNegocio("Admin sin negocio".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
