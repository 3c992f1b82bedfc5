// src/handlers/negocios.rs

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
    middleware::guard::{Eliminacion, Escritura, Lectura, Negocios, TiposNegocio},
    models::negocio::{
        ActualizarNegocioPayload, ActualizarTipoNegocioPayload, CrearTipoNegocioPayload,
    },
};

// GET /api/negocios/mi-negocio — el negocio del alcance del token.
pub async fn mi_negocio(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Negocios>,
) -> Result<impl IntoResponse, AppError> {
    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let negocio = app_state
        .negocio_repo
        .buscar_por_id(negocio_id)
        .await?
        .ok_or(AppError::NoEncontrado)?;
    Ok(Json(negocio))
}

// PATCH /api/negocios/mi-negocio
pub async fn actualizar_mi_negocio(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Negocios>,
    Json(payload): Json<ActualizarNegocioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let negocio = app_state
        .negocio_repo
        .actualizar_negocio(
            negocio_id,
            payload.nombre_negocio.as_deref(),
            payload.direccion.as_deref(),
            payload.telefono.as_deref(),
            payload.correo.as_deref(),
            payload.tipo_negocio_id,
        )
        .await?;
    Ok(Json(negocio))
}

// ---------------------------------------------------------------------------
// Tipos de negocio (catálogo global)
// ---------------------------------------------------------------------------

// POST /api/negocios/tipos
pub async fn crear_tipo(
    State(app_state): State<AppState>,
    Escritura(..): Escritura<TiposNegocio>,
    Json(payload): Json<CrearTipoNegocioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tipo = app_state
        .negocio_repo
        .crear_tipo_negocio(&payload.nombre_tipo_negocio, &payload.descripcion)
        .await?;
    Ok((StatusCode::CREATED, Json(tipo)))
}

// GET /api/negocios/tipos
pub async fn listar_tipos(
    State(app_state): State<AppState>,
    Lectura(..): Lectura<TiposNegocio>,
) -> Result<impl IntoResponse, AppError> {
    let tipos = app_state.negocio_repo.listar_tipos_negocio().await?;
    Ok(Json(tipos))
}

// GET /api/negocios/tipos/{id}
pub async fn obtener_tipo(
    State(app_state): State<AppState>,
    Lectura(..): Lectura<TiposNegocio>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let tipo = app_state.negocio_repo.obtener_tipo_negocio(id).await?;
    Ok(Json(tipo))
}

// PATCH /api/negocios/tipos/{id}
pub async fn actualizar_tipo(
    State(app_state): State<AppState>,
    Escritura(..): Escritura<TiposNegocio>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarTipoNegocioPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tipo = app_state
        .negocio_repo
        .actualizar_tipo_negocio(
            id,
            payload.nombre_tipo_negocio.as_deref(),
            payload.descripcion.as_deref(),
        )
        .await?;
    Ok(Json(tipo))
}

// DELETE /api/negocios/tipos/{id}
pub async fn eliminar_tipo(
    State(app_state): State<AppState>,
    Eliminacion(..): Eliminacion<TiposNegocio>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.negocio_repo.eliminar_tipo_negocio(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
