// src/handlers/usuarios.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{common::error::AppError, config::AppState, middleware::auth::UsuarioActual};

// GET /api/usuarios/me — eco de la identidad del token.
pub async fn me(usuario: UsuarioActual) -> impl IntoResponse {
    Json(json!({
        "id": usuario.id,
        "nombre": usuario.nombre,
        "correo": usuario.correo,
        "roles": usuario.roles,
        "negocio": usuario.alcance.como_claim(),
    }))
}

// GET /api/usuarios/me/negocios — negocios visibles vía usuario_negocio.
pub async fn mis_negocios(
    State(app_state): State<AppState>,
    usuario: UsuarioActual,
) -> Result<impl IntoResponse, AppError> {
    let negocios = app_state.negocio_repo.negocios_visibles(usuario.id).await?;
    Ok(Json(negocios))
}
