// src/handlers/gastos.rs

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
    middleware::guard::{Eliminacion, Escritura, Gastos, Lectura},
    models::gasto::{ActualizarGastoPayload, CrearGastoPayload},
};

// POST /api/gastos
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Gastos>,
    Json(payload): Json<CrearGastoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let gasto = app_state
        .gasto_repo
        .crear(negocio_id, &payload.descripcion, payload.monto, payload.fecha)
        .await?;
    Ok((StatusCode::CREATED, Json(gasto)))
}

// GET /api/gastos
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Gastos>,
) -> Result<impl IntoResponse, AppError> {
    let gastos = app_state.gasto_repo.listar(usuario.alcance.filtro()).await?;
    Ok(Json(gastos))
}

// GET /api/gastos/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Gastos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let gasto = app_state
        .gasto_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    Ok(Json(gasto))
}

// PATCH /api/gastos/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Gastos>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarGastoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let gasto = app_state
        .gasto_repo
        .actualizar(
            id,
            usuario.alcance.filtro(),
            payload.descripcion.as_deref(),
            payload.monto,
            payload.fecha,
        )
        .await?;
    Ok(Json(gasto))
}

// DELETE /api/gastos/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Gastos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .gasto_repo
        .eliminar(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
