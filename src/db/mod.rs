pub mod caja_repo;
pub mod cliente_repo;
pub mod empleado_repo;
pub mod gasto_repo;
pub mod negocio_repo;
pub mod producto_repo;
pub mod proveedor_repo;
pub mod rol_repo;
pub mod user_repo;
pub mod venta_repo;

pub use caja_repo::CajaRepository;
pub use cliente_repo::ClienteRepository;
pub use empleado_repo::EmpleadoRepository;
pub use gasto_repo::GastoRepository;
pub use negocio_repo::NegocioRepository;
pub use producto_repo::ProductoRepository;
pub use proveedor_repo::ProveedorRepository;
pub use rol_repo::RolRepository;
pub use user_repo::UserRepository;
pub use venta_repo::VentaRepository;
