pub mod auth;
pub mod caja;
pub mod clientes;
pub mod empleados;
pub mod gastos;
pub mod negocios;
pub mod productos;
pub mod proveedores;
pub mod usuarios;
pub mod ventas;
