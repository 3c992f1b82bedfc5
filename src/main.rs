// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tokio::net::TcpListener;

mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    let app_state = AppState::new()
        .await
        .expect("Fallo al inicializar el estado de la aplicación.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Fallo al correr las migraciones de la base de datos.");

    // Los cuatro roles del sistema tienen que existir antes del primer login.
    app_state
        .role_registry
        .sembrar_roles(&app_state.db_pool)
        .await
        .expect("Fallo al sembrar los roles del sistema.");

    tracing::info!("Migraciones y roles listos");

    // Rutas públicas: registro, login y refresh.
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/token/refresh", post(handlers::auth::refresh));

    let usuario_routes = Router::new()
        .route("/me", get(handlers::usuarios::me))
        .route("/me/negocios", get(handlers::usuarios::mis_negocios));

    let negocio_routes = Router::new()
        .route(
            "/mi-negocio",
            get(handlers::negocios::mi_negocio).patch(handlers::negocios::actualizar_mi_negocio),
        )
        .route(
            "/tipos",
            post(handlers::negocios::crear_tipo).get(handlers::negocios::listar_tipos),
        )
        .route(
            "/tipos/{id}",
            get(handlers::negocios::obtener_tipo)
                .patch(handlers::negocios::actualizar_tipo)
                .delete(handlers::negocios::eliminar_tipo),
        );

    let empleado_routes = Router::new()
        .route(
            "/",
            post(handlers::empleados::crear).get(handlers::empleados::listar),
        )
        .route(
            "/{id}",
            get(handlers::empleados::obtener)
                .patch(handlers::empleados::actualizar)
                .delete(handlers::empleados::eliminar),
        );

    let cliente_routes = Router::new()
        .route(
            "/",
            post(handlers::clientes::crear).get(handlers::clientes::listar),
        )
        .route(
            "/{id}",
            get(handlers::clientes::obtener)
                .patch(handlers::clientes::actualizar)
                .delete(handlers::clientes::eliminar),
        );

    // Los sub-recursos van ANTES de /{id} para que "categorias" no se lea
    // como un id.
    let producto_routes = Router::new()
        .route(
            "/categorias",
            post(handlers::productos::crear_categoria).get(handlers::productos::listar_categorias),
        )
        .route(
            "/categorias/{id}",
            delete(handlers::productos::eliminar_categoria),
        )
        .route(
            "/tipos",
            post(handlers::productos::crear_tipo).get(handlers::productos::listar_tipos),
        )
        .route("/tipos/{id}", delete(handlers::productos::eliminar_tipo))
        .route(
            "/",
            post(handlers::productos::crear).get(handlers::productos::listar),
        )
        .route(
            "/{id}",
            get(handlers::productos::obtener)
                .patch(handlers::productos::actualizar)
                .delete(handlers::productos::eliminar),
        );

    let proveedor_routes = Router::new()
        .route(
            "/",
            post(handlers::proveedores::crear).get(handlers::proveedores::listar),
        )
        .route(
            "/{id}",
            get(handlers::proveedores::obtener)
                .patch(handlers::proveedores::actualizar)
                .delete(handlers::proveedores::eliminar),
        );

    let venta_routes = Router::new()
        .route(
            "/",
            post(handlers::ventas::crear).get(handlers::ventas::listar),
        )
        .route(
            "/{id}",
            get(handlers::ventas::obtener)
                .patch(handlers::ventas::actualizar_estado)
                .delete(handlers::ventas::eliminar),
        )
        .route(
            "/{id}/pagos",
            post(handlers::ventas::crear_pago).get(handlers::ventas::listar_pagos),
        );

    let gasto_routes = Router::new()
        .route(
            "/",
            post(handlers::gastos::crear).get(handlers::gastos::listar),
        )
        .route(
            "/{id}",
            get(handlers::gastos::obtener)
                .patch(handlers::gastos::actualizar)
                .delete(handlers::gastos::eliminar),
        );

    let caja_routes = Router::new()
        .route(
            "/",
            post(handlers::caja::abrir).get(handlers::caja::listar),
        )
        .route("/{id}/cerrar", patch(handlers::caja::cerrar));

    // Todo lo que no sea /api/auth pasa por el guard de autenticación.
    let rutas_protegidas = Router::new()
        .nest("/api/usuarios", usuario_routes)
        .nest("/api/negocios", negocio_routes)
        .nest("/api/empleados", empleado_routes)
        .nest("/api/clientes", cliente_routes)
        .nest("/api/productos", producto_routes)
        .nest("/api/proveedores", proveedor_routes)
        .nest("/api/ventas", venta_routes)
        .nest("/api/gastos", gasto_routes)
        .nest("/api/caja", caja_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .merge(rutas_protegidas)
        .with_state(app_state);

    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Fallo al iniciar el listener TCP");
    tracing::info!("Servidor escuchando en {}", addr);
    axum::serve(listener, app)
        .await
        .expect("Error en el servidor Axum");
}
