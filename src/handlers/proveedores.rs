// src/handlers/proveedores.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::guard::{Eliminacion, Escritura, Lectura, Proveedores},
    models::proveedor::{ActualizarProveedorPayload, CrearProveedorPayload},
};

// POST /api/proveedores — crea el proveedor y vincula sus productos en una
// transacción.
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Proveedores>,
    Json(payload): Json<CrearProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;

    let mut tx = app_state.db_pool.begin().await?;
    let proveedor = app_state
        .proveedor_repo
        .crear(
            &mut *tx,
            negocio_id,
            &payload.nombre,
            &payload.telefono,
            &payload.correo,
            &payload.direccion,
            &payload.tipo_proveedor,
        )
        .await?;

    if !payload.productos.is_empty() {
        app_state
            .proveedor_repo
            .vincular_productos(&mut *tx, proveedor.id, negocio_id, &payload.productos)
            .await?;
    }
    tx.commit().await?;

    Ok((StatusCode::CREATED, Json(proveedor)))
}

// GET /api/proveedores
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Proveedores>,
) -> Result<impl IntoResponse, AppError> {
    let proveedores = app_state
        .proveedor_repo
        .listar(usuario.alcance.filtro())
        .await?;
    Ok(Json(proveedores))
}

// GET /api/proveedores/{id} — incluye los ids de productos que surte.
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Proveedores>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let proveedor = app_state
        .proveedor_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    let productos = app_state
        .proveedor_repo
        .productos_de_proveedor(proveedor.id)
        .await?;

    Ok(Json(json!({
        "proveedor": proveedor,
        "productos": productos,
    })))
}

// PATCH /api/proveedores/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Proveedores>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarProveedorPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let proveedor = app_state
        .proveedor_repo
        .actualizar(
            id,
            usuario.alcance.filtro(),
            payload.nombre.as_deref(),
            payload.telefono.as_deref(),
            payload.correo.as_deref(),
            payload.direccion.as_deref(),
            payload.tipo_proveedor.as_deref(),
        )
        .await?;
    Ok(Json(proveedor))
}

// DELETE /api/proveedores/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Proveedores>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .proveedor_repo
        .eliminar(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
