// src/middleware/auth.rs

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{common::error::AppError, config::AppState, services::tenant::Alcance};

// La identidad autenticada del request, tal como la firmó el emisor de
// tokens: id, datos de contacto, roles y el alcance ya resuelto.
#[derive(Debug, Clone)]
pub struct UsuarioActual {
    pub id: i64,
    pub nombre: String,
    pub correo: String,
    pub roles: Vec<String>,
    pub alcance: Alcance,
}

// Middleware de autenticación: valida el Bearer token y deja el usuario en
// las extensions del request. Las rutas públicas (register/login/refresh) no
// pasan por acá.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::TokenInvalido)?;

    let claims = app_state.auth_service.validar_access_token(bearer.token())?;

    let usuario = UsuarioActual {
        id: claims.sub,
        nombre: claims.nombre,
        correo: claims.correo,
        roles: claims.roles,
        alcance: Alcance::desde_claim(claims.negocio),
    };

    request.extensions_mut().insert(usuario);
    Ok(next.run(request).await)
}

// Extractor para usar el usuario autenticado directamente en los handlers.
impl<S> FromRequestParts<S> for UsuarioActual
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UsuarioActual>()
            .cloned()
            .ok_or(AppError::TokenInvalido)
    }
}
