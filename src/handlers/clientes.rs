// src/handlers/clientes.rs

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
    middleware::guard::{Clientes, Eliminacion, Escritura, Lectura},
    models::cliente::{ActualizarClientePayload, CrearClientePayload},
};

// POST /api/clientes
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Clientes>,
    Json(payload): Json<CrearClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let cliente = app_state
        .cliente_repo
        .crear(
            negocio_id,
            &payload.nombre_cliente,
            &payload.apellido_cliente,
            &payload.correo,
            &payload.telefono,
            &payload.direccion,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(cliente)))
}

// GET /api/clientes
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Clientes>,
) -> Result<impl IntoResponse, AppError> {
    let clientes = app_state
        .cliente_repo
        .listar(usuario.alcance.filtro())
        .await?;
    Ok(Json(clientes))
}

// GET /api/clientes/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Clientes>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let cliente = app_state
        .cliente_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    Ok(Json(cliente))
}

// PATCH /api/clientes/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Clientes>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarClientePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let cliente = app_state
        .cliente_repo
        .actualizar(
            id,
            usuario.alcance.filtro(),
            payload.nombre_cliente.as_deref(),
            payload.apellido_cliente.as_deref(),
            payload.correo.as_deref(),
            payload.telefono.as_deref(),
            payload.direccion.as_deref(),
        )
        .await?;
    Ok(Json(cliente))
}

// DELETE /api/clientes/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Clientes>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .cliente_repo
        .eliminar(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
