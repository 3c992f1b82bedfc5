// src/handlers/caja.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::guard::{Caja, Escritura, Lectura},
    models::caja::{AbrirCajaPayload, CerrarCajaPayload},
};

// POST /api/caja — abre un turno de caja.
pub async fn abrir(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Caja>,
    Json(payload): Json<AbrirCajaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let caja = app_state
        .caja_repo
        .abrir(
            negocio_id,
            payload.fecha_apertura,
            payload.monto_apertura,
            payload.observaciones.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(caja)))
}

// GET /api/caja
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Caja>,
) -> Result<impl IntoResponse, AppError> {
    let cajas = app_state.caja_repo.listar(usuario.alcance.filtro()).await?;
    Ok(Json(cajas))
}

// PATCH /api/caja/{id}/cerrar — solo cierra cajas que siguen abiertas; una
// caja ya cerrada responde como si no existiera.
pub async fn cerrar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Caja>,
    Path(id): Path<i64>,
    Json(payload): Json<CerrarCajaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let caja = app_state
        .caja_repo
        .cerrar(
            id,
            usuario.alcance.filtro(),
            payload.fecha_cierre,
            payload.monto_cierre,
            payload.observaciones.as_deref(),
        )
        .await?;
    Ok(Json(caja))
}
