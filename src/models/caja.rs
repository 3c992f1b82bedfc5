use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Turno de caja: se abre con un monto y se cierra con otro.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Caja {
    pub id: i64,
    pub negocio_id: i64,
    pub fecha_apertura: NaiveDate,
    pub fecha_cierre: Option<NaiveDate>,
    pub monto_apertura: Decimal,
    pub monto_cierre: Option<Decimal>,
    pub observaciones: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AbrirCajaPayload {
    pub fecha_apertura: Option<NaiveDate>,
    pub monto_apertura: Decimal,
    pub observaciones: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CerrarCajaPayload {
    pub fecha_cierre: Option<NaiveDate>,
    pub monto_cierre: Decimal,
    pub observaciones: Option<String>,
}
