// src/handlers/empleados.rs

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
    middleware::guard::{Eliminacion, Empleados, Escritura, Lectura},
    models::empleado::{ActualizarEmpleadoPayload, CrearEmpleadoPayload},
};

// POST /api/empleados — crea la cuenta y el registro de empleo de una vez.
pub async fn crear(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Empleados>,
    Json(payload): Json<CrearEmpleadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let empleado = app_state
        .auth_service
        .aprovisionar_empleado(
            negocio_id,
            &payload.nombre,
            &payload.apellido,
            &payload.correo,
            &payload.password,
            payload.salario,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(empleado)))
}

// GET /api/empleados — los empleados del negocio del que llama.
pub async fn listar(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Empleados>,
) -> Result<impl IntoResponse, AppError> {
    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let empleados = app_state
        .empleado_repo
        .listar_por_negocio(negocio_id)
        .await?;
    Ok(Json(empleados))
}

// GET /api/empleados/{id}
pub async fn obtener(
    State(app_state): State<AppState>,
    Lectura(usuario, ..): Lectura<Empleados>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let empleado = app_state.empleado_repo.obtener(id, negocio_id).await?;
    Ok(Json(empleado))
}

// PATCH /api/empleados/{id}
pub async fn actualizar(
    State(app_state): State<AppState>,
    Escritura(usuario, ..): Escritura<Empleados>,
    Path(id): Path<i64>,
    Json(payload): Json<ActualizarEmpleadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let negocio_id = usuario.alcance.negocio_objetivo()?;
    let empleado = app_state
        .empleado_repo
        .actualizar(
            id,
            negocio_id,
            payload.nombre.as_deref(),
            payload.apellido.as_deref(),
            payload.salario,
        )
        .await?;
    Ok(Json(empleado))
}

// DELETE /api/empleados/{id}
pub async fn eliminar(
    State(app_state): State<AppState>,
    Eliminacion(usuario, ..): Eliminacion<Empleados>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let negocio_id = usuario.alcance.negocio_objetivo()?;
    app_state.empleado_repo.eliminar(id, negocio_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
