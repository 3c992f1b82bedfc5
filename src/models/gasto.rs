use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Gasto {
    pub id: i64,
    pub negocio_id: i64,
    pub descripcion: String,
    pub monto: Decimal,
    pub fecha: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearGastoPayload {
    #[validate(length(min = 1, message = "La descripción es obligatoria."))]
    pub descripcion: String,
    pub monto: Decimal,
    pub fecha: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarGastoPayload {
    #[validate(length(min = 1, message = "La descripción no puede quedar vacía."))]
    pub descripcion: Option<String>,
    pub monto: Option<Decimal>,
    pub fecha: Option<NaiveDate>,
}
