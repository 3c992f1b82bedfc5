// src/handlers/productos.rs

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
    middleware::guard::{Eliminacion, Escritura, Lectura, Productos},
    models::producto::{
        ActualizarProductoPayload, CrearCategoriaPayload, CrearProductoPayload,
        CrearTipoProductoPayload,
    },
};

// POST /api/productos
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Productos>,
    Json(payload): Json<CrearProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let producto = app_state
        .producto_repo
        .crear(
            negocio_id,
            &payload.nombre_producto,
            &payload.descripcion,
            payload.stock_actual,
            payload.stock_min,
            payload.stock_max,
            &payload.unidad_medida,
            payload.precio_venta,
            payload.categoria_id,
            payload.tipo_id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(producto)))
}

// GET /api/productos
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Productos>,
) -> Result<impl IntoResponse, AppError> {
    let productos = app_state
        .producto_repo
        .listar(usuario.alcance.filtro())
        .await?;
    Ok(Json(productos))
}

// GET /api/productos/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Productos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let producto = app_state
        .producto_repo
        .obtener(id, usuario.alcance.filtro())
        .await?;
    Ok(Json(producto))
}

// PATCH /api/productos/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Productos>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let producto = app_state
        .producto_repo
        .actualizar(
            id,
            usuario.alcance.filtro(),
            payload.nombre_producto.as_deref(),
            payload.descripcion.as_deref(),
            payload.stock_actual,
            payload.stock_min,
            payload.stock_max,
            payload.unidad_medida.as_deref(),
            payload.precio_venta,
            payload.categoria_id,
            payload.tipo_id,
        )
        .await?;
    Ok(Json(producto))
}

// DELETE /api/productos/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Productos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .producto_repo
        .eliminar(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Categorías y tipos de producto
// ---------------------------------------------------------------------------

// POST /api/productos/categorias
pub async fn crear_categoria(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Productos>,
    Json(payload): Json<CrearCategoriaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let categoria = app_state
        .producto_repo
        .crear_categoria(negocio_id, &payload.nombre_categoria)
        .await?;
    Ok((StatusCode::CREATED, Json(categoria)))
}

// GET /api/productos/categorias
pub async fn listar_categorias(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Productos>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state
        .producto_repo
        .listar_categorias(usuario.alcance.filtro())
        .await?;
    Ok(Json(categorias))
}

// DELETE /api/productos/categorias/{id}
pub async fn eliminar_categoria(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Productos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .producto_repo
        .eliminar_categoria(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/productos/tipos
pub async fn crear_tipo(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Productos>,
    Json(payload): Json<CrearTipoProductoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let tipo = app_state
        .producto_repo
        .crear_tipo_producto(negocio_id, &payload.nombre_tipo_producto)
        .await?;
    Ok((StatusCode::CREATED, Json(tipo)))
}

// GET /api/productos/tipos
pub async fn listar_tipos(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Productos>,
) -> Result<impl IntoResponse, AppError> {
    let tipos = app_state
        .producto_repo
        .listar_tipos_producto(usuario.alcance.filtro())
        .await?;
    Ok(Json(tipos))
}

// DELETE /api/productos/tipos/{id}
pub async fn eliminar_tipo(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Productos>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .producto_repo
        .eliminar_tipo_producto(id, usuario.alcance.filtro())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
