// src/handlers/auth.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{LoginPayload, RefreshPayload, RegistroPayload},
};

// POST /api/auth/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegistroPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let respuesta = app_state
        .auth_service
        .registrar_propietario(
            &payload.nombre,
            &payload.apellido,
            &payload.correo,
            &payload.password,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(respuesta)))
}

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let tokens = app_state
        .auth_service
        .login(&payload.correo, &payload.password)
        .await?;

    Ok(Json(tokens))
}

// POST /api/auth/token/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<impl IntoResponse, AppError> {
    let token = app_state
        .auth_service
        .refrescar(&payload.refresh_token)
        .await?;

    Ok(Json(token))
}
