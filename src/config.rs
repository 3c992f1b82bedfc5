// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{
        CajaRepository, ClienteRepository, EmpleadoRepository, GastoRepository, NegocioRepository,
        ProductoRepository, ProveedorRepository, RolRepository, UserRepository, VentaRepository,
    },
    services::{auth::AuthService, roles::RoleRegistry, tenant::TenantResolver},
};

// El estado compartido de la aplicación: la pool, los repositorios y los
// servicios ya armados.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub role_registry: RoleRegistry,
    pub negocio_repo: NegocioRepository,
    pub empleado_repo: EmpleadoRepository,
    pub cliente_repo: ClienteRepository,
    pub producto_repo: ProductoRepository,
    pub proveedor_repo: ProveedorRepository,
    pub venta_repo: VentaRepository,
    pub gasto_repo: GastoRepository,
    pub caja_repo: CajaRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL debe estar definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET debe estar definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("Conexión con la base de datos establecida");

        // --- Arma el grafo de dependencias ---
        let user_repo = UserRepository::new(db_pool.clone());
        let rol_repo = RolRepository::new(db_pool.clone());
        let negocio_repo = NegocioRepository::new(db_pool.clone());
        let empleado_repo = EmpleadoRepository::new(db_pool.clone());

        let role_registry = RoleRegistry::new(rol_repo);
        let resolver = TenantResolver::new(negocio_repo.clone(), empleado_repo.clone());

        let auth_service = AuthService::new(
            user_repo,
            negocio_repo.clone(),
            empleado_repo.clone(),
            role_registry.clone(),
            resolver,
            jwt_secret,
            db_pool.clone(),
        );

        Ok(Self {
            auth_service,
            role_registry,
            negocio_repo,
            empleado_repo,
            cliente_repo: ClienteRepository::new(db_pool.clone()),
            producto_repo: ProductoRepository::new(db_pool.clone()),
            proveedor_repo: ProveedorRepository::new(db_pool.clone()),
            venta_repo: VentaRepository::new(db_pool.clone()),
            gasto_repo: GastoRepository::new(db_pool.clone()),
            caja_repo: CajaRepository::new(db_pool.clone()),
            db_pool,
        })
    }
}
