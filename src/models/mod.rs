pub mod auth;
pub mod caja;
pub mod cliente;
pub mod empleado;
pub mod gasto;
pub mod negocio;
pub mod producto;
pub mod proveedor;
pub mod venta;
