use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Venta {
    pub id: i64,
    pub negocio_id: i64,
    pub fecha_venta: NaiveDate,
    pub total_venta: Decimal,
    pub estado: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VentaProducto {
    pub id: i64,
    pub venta_id: i64,
    pub producto_id: i64,
    pub cantidad: i32,
    pub precio_venta_unitario: Decimal,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Pago {
    pub id: i64,
    pub venta_id: i64,
    pub fecha_pago: NaiveDate,
    pub monto_pago: Decimal,
    pub metodo_pago: String,
}

// Venta con sus renglones, como la devuelve la API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VentaDetalle {
    #[serde(flatten)]
    pub venta: Venta,
    pub productos: Vec<VentaProducto>,
}

// Serialize además de Deserialize: el reporte de validación de la lista de
// renglones incluye el valor rechazado.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenglonVentaPayload {
    pub producto_id: i64,
    #[validate(range(min = 1, message = "La cantidad debe ser al menos 1."))]
    pub cantidad: i32,
    pub precio_venta_unitario: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearVentaPayload {
    pub fecha_venta: Option<NaiveDate>,
    #[serde(default = "estado_pendiente")]
    pub estado: String,
    #[validate(length(min = 1, message = "La venta necesita al menos un producto."))]
    #[validate(nested)]
    pub productos: Vec<RenglonVentaPayload>,
}

fn estado_pendiente() -> String {
    "PENDIENTE".to_string()
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarEstadoVentaPayload {
    #[validate(length(min = 1, message = "El estado es obligatorio."))]
    pub estado: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrearPagoPayload {
    pub fecha_pago: Option<NaiveDate>,
    pub monto_pago: Decimal,
    #[validate(length(min = 1, message = "El método de pago es obligatorio."))]
    pub metodo_pago: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renglon(producto_id: i64, cantidad: i32) -> RenglonVentaPayload {
        RenglonVentaPayload {
            producto_id,
            cantidad,
            precio_venta_unitario: Decimal::new(1050, 2),
        }
    }

    fn venta_con(productos: Vec<RenglonVentaPayload>) -> CrearVentaPayload {
        CrearVentaPayload {
            fecha_venta: None,
            estado: estado_pendiente(),
            productos,
        }
    }

    #[test]
    fn una_venta_sin_renglones_no_valida() {
        assert!(venta_con(vec![]).validate().is_err());
    }

    #[test]
    fn una_venta_con_renglones_validos_pasa() {
        assert!(venta_con(vec![renglon(1, 2), renglon(2, 1)]).validate().is_ok());
    }

    #[test]
    fn un_renglon_con_cantidad_cero_no_valida() {
        assert!(venta_con(vec![renglon(1, 0)]).validate().is_err());
    }
}
