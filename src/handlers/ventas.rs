// src/handlers/ventas.rs

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
    middleware::guard::{Eliminacion, Escritura, Lectura, Ventas},
    models::venta::{ActualizarEstadoVentaPayload, CrearPagoPayload, CrearVentaPayload, VentaDetalle},
};

// POST /api/ventas — la venta entra con sus renglones; el repo calcula el
// total y descuenta stock en la misma transacción.
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Ventas>,
    Json(payload): Json<CrearVentaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let renglones: Vec<(i64, i32, _)> = payload
        .productos
        .iter()
        .map(|r| (r.producto_id, r.cantidad, r.precio_venta_unitario))
        .collect();

    let venta = app_state
        .venta_repo
        .crear_venta(negocio_id, payload.fecha_venta, &payload.estado, &renglones)
        .await?;
    let productos = app_state.venta_repo.renglones_de_venta(venta.id).await?;

    Ok((StatusCode::CREATED, Json(VentaDetalle { venta, productos })))
}

// GET /api/ventas
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Ventas>,
) -> Result<impl IntoResponse, AppError> {
    let ventas = app_state.venta_repo.listar(usuario.alcance.filtro()).await?;
    Ok(Json(ventas))
}

// GET /api/ventas/{id} — con sus renglones.
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Ventas>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let venta = app_state
        .venta_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    let productos = app_state.venta_repo.renglones_de_venta(venta.id).await?;
    Ok(Json(VentaDetalle { venta, productos }))
}

// PATCH /api/ventas/{id} — solo cambia el estado; los renglones son inmutables.
pub async fn actualizar_estado(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Ventas>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarEstadoVentaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let venta = app_state
        .venta_repo
        .actualizar_estado(id, usuario.alcance.filtro(), &payload.estado)
        .await?;
    Ok(Json(venta))
}

// DELETE /api/ventas/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Ventas>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .venta_repo
        .eliminar(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Pagos de una venta
// ---------------------------------------------------------------------------

// POST /api/ventas/{id}/pagos — la venta se busca primero con el alcance del
// token, así un pago nunca cae en una venta de otro negocio.
pub async fn crear_pago(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Ventas>,
    Path(id): Path<i64>,
    Json(payload): Json<CrearPagoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let venta = app_state
        .venta_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    let pago = app_state
        .venta_repo
        .crear_pago(
            venta.id,
            payload.fecha_pago,
            payload.monto_pago,
            &payload.metodo_pago,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(pago)))
}

// GET /api/ventas/{id}/pagos
pub async fn listar_pagos(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Ventas>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let venta = app_state
        .venta_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    let pagos = app_state.venta_repo.pagos_de_venta(venta.id).await?;
    Ok(Json(pagos))
}
