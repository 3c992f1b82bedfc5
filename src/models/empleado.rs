use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

// Relación de empleo: ata un usuario a exactamente un negocio. Es el camino
// por el que un usuario no propietario queda asociado a su tenant.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Empleado {
    pub id: i64,
    pub usuario_id: i64,
    pub negocio_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub salario: Decimal,
}

// Vista de lista: el empleado junto con el correo de su cuenta.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmpleadoConCuenta {
    pub id: i64,
    pub usuario_id: i64,
    pub negocio_id: i64,
    pub nombre: String,
    pub apellido: String,
    pub salario: Decimal,
    pub correo: String,
}

// Alta de empleado: crea la cuenta de usuario y el registro de empleo en una
// sola transacción.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearEmpleadoPayload {
    #[validate(length(min = 1, message = "El nombre es obligatorio."))]
    pub nombre: String,
    #[serde(default)]
    pub apellido: String,
    #[validate(email(message = "El correo proporcionado es inválido."))]
    pub correo: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres."))]
    pub password: String,
    pub salario: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarEmpleadoPayload {
    #[validate(length(min = 1, message = "El nombre no puede quedar vacío."))]
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub salario: Option<Decimal>,
}
