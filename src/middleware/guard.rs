// src/middleware/guard.rs
//
// Guard de autorización. En el sistema viejo cada vista traía su propio
// `if 'Admin' not in roles...`; acá la política por recurso es UNA tabla
// declarativa y la evaluación vive en un solo lugar. La regla por recurso es
// asimétrica a propósito: lectura y escritura permisivas, eliminación
// restringida.

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::UsuarioActual,
    services::roles::{ROL_ADMIN, ROL_MODERADOR, ROL_SUPERADMIN, ROL_USUARIO, normalizar_rol},
};

// Qué roles exige cada verbo sobre un recurso.
#[derive(Debug, Clone, Copy)]
pub struct Politica {
    pub lectura: &'static [&'static str],
    pub escritura: &'static [&'static str],
    pub eliminacion: &'static [&'static str],
}

pub trait RecursoProtegido: Send + Sync + 'static {
    const NOMBRE: &'static str;
    const POLITICA: Politica;
}

// La decisión: alcanza con tener ALGUNO de los roles requeridos (intersección
// de conjuntos, no igualdad exacta).
pub fn roles_intersectan(roles_usuario: &[String], requeridos: &[&str]) -> bool {
    roles_usuario
        .iter()
        .any(|rol| requeridos.iter().any(|req| normalizar_rol(rol) == *req))
}

fn verificar(
    usuario: &UsuarioActual,
    requeridos: &[&str],
    recurso: &str,
    accion: &str,
) -> Result<(), AppError> {
    if roles_intersectan(&usuario.roles, requeridos) {
        return Ok(());
    }
    // El detalle va al log; el cliente recibe el 403 genérico.
    Err(AppError::AccesoDenegado(format!(
        "usuario {} sin rol suficiente para {accion} sobre {recurso} (tiene {:?}, requiere alguno de {:?})",
        usuario.id, usuario.roles, requeridos
    )))
}

// ---------------------------------------------------------------------------
// Extractores-guardián: pedir `Lectura<Clientes>` en un handler YA verifica
// rol; el alcance del negocio viaja adentro para filtrar las consultas.
// ---------------------------------------------------------------------------

pub struct Lectura<R>(pub UsuarioActual, pub PhantomData<R>);
pub struct Escritura<R>(pub UsuarioActual, pub PhantomData<R>);
pub struct Eliminacion<R>(pub UsuarioActual, pub PhantomData<R>);

fn usuario_del_request(parts: &Parts) -> Result<UsuarioActual, AppError> {
    parts
        .extensions
        .get::<UsuarioActual>()
        .cloned()
        .ok_or(AppError::TokenInvalido)
}

impl<R, S> FromRequestParts<S> for Lectura<R>
where
    R: RecursoProtegido,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let usuario = usuario_del_request(parts)?;
        verificar(&usuario, R::POLITICA.lectura, R::NOMBRE, "lectura")?;
        Ok(Lectura(usuario, PhantomData))
    }
}

impl<R, S> FromRequestParts<S> for Escritura<R>
where
    R: RecursoProtegido,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let usuario = usuario_del_request(parts)?;
        verificar(&usuario, R::POLITICA.escritura, R::NOMBRE, "escritura")?;
        Ok(Escritura(usuario, PhantomData))
    }
}

impl<R, S> FromRequestParts<S> for Eliminacion<R>
where
    R: RecursoProtegido,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let usuario = usuario_del_request(parts)?;
        verificar(&usuario, R::POLITICA.eliminacion, R::NOMBRE, "eliminación")?;
        Ok(Eliminacion(usuario, PhantomData))
    }
}

// ---------------------------------------------------------------------------
// LA TABLA DE POLÍTICAS (configuración, no código por endpoint)
// ---------------------------------------------------------------------------

const TODOS: &[&str] = &[ROL_SUPERADMIN, ROL_ADMIN, ROL_MODERADOR, ROL_USUARIO];
const SOLO_ADMIN: &[&str] = &[ROL_SUPERADMIN, ROL_ADMIN];

pub struct Negocios;
impl RecursoProtegido for Negocios {
    const NOMBRE: &'static str = "negocios";
    const POLITICA: Politica = Politica {
        lectura: SOLO_ADMIN,
        escritura: SOLO_ADMIN,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct TiposNegocio;
impl RecursoProtegido for TiposNegocio {
    const NOMBRE: &'static str = "tipos de negocio";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Empleados;
impl RecursoProtegido for Empleados {
    const NOMBRE: &'static str = "empleados";
    const POLITICA: Politica = Politica {
        lectura: SOLO_ADMIN,
        escritura: SOLO_ADMIN,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Clientes;
impl RecursoProtegido for Clientes {
    const NOMBRE: &'static str = "clientes";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Productos;
impl RecursoProtegido for Productos {
    const NOMBRE: &'static str = "productos";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Proveedores;
impl RecursoProtegido for Proveedores {
    const NOMBRE: &'static str = "proveedores";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Ventas;
impl RecursoProtegido for Ventas {
    const NOMBRE: &'static str = "ventas";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Gastos;
impl RecursoProtegido for Gastos {
    const NOMBRE: &'static str = "gastos";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

pub struct Caja;
impl RecursoProtegido for Caja {
    const NOMBRE: &'static str = "caja";
    const POLITICA: Politica = Politica {
        lectura: TODOS,
        escritura: TODOS,
        eliminacion: SOLO_ADMIN,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tenant::Alcance;

    fn usuario_con_roles(nombres: &[&str]) -> UsuarioActual {
        UsuarioActual {
            id: 1,
            nombre: "Prueba".into(),
            correo: "p@x.com".into(),
            roles: nombres.iter().map(|n| n.to_string()).collect(),
            alcance: Alcance::Negocio(1),
        }
    }

    #[test]
    fn basta_con_uno_de_los_roles_requeridos() {
        assert!(roles_intersectan(
            &["USUARIO".into()],
            &[ROL_ADMIN, ROL_MODERADOR, ROL_USUARIO]
        ));
    }

    #[test]
    fn sin_interseccion_no_hay_acceso() {
        assert!(!roles_intersectan(&["USUARIO".into()], SOLO_ADMIN));
        assert!(!roles_intersectan(&[], TODOS));
    }

    #[test]
    fn la_comparacion_no_distingue_mayusculas() {
        assert!(roles_intersectan(&["Admin".into()], SOLO_ADMIN));
        assert!(roles_intersectan(&["superadmin".into()], SOLO_ADMIN));
    }

    #[test]
    fn usuario_puede_leer_pero_no_eliminar_productos() {
        let usuario = usuario_con_roles(&["USUARIO"]);
        assert!(verificar(&usuario, Productos::POLITICA.lectura, "productos", "lectura").is_ok());

        let err = verificar(
            &usuario,
            Productos::POLITICA.eliminacion,
            "productos",
            "eliminación",
        )
        .unwrap_err();
        assert!(matches!(err, AppError::AccesoDenegado(_)));
    }

    #[test]
    fn moderador_escribe_pero_no_elimina() {
        let usuario = usuario_con_roles(&["MODERADOR"]);
        assert!(verificar(&usuario, Clientes::POLITICA.escritura, "clientes", "escritura").is_ok());
        assert!(
            verificar(&usuario, Clientes::POLITICA.eliminacion, "clientes", "eliminación").is_err()
        );
    }

    #[test]
    fn solo_admin_gestiona_empleados() {
        let admin = usuario_con_roles(&["ADMIN"]);
        let empleado = usuario_con_roles(&["USUARIO"]);
        assert!(verificar(&admin, Empleados::POLITICA.lectura, "empleados", "lectura").is_ok());
        assert!(verificar(&empleado, Empleados::POLITICA.lectura, "empleados", "lectura").is_err());
    }

    #[test]
    fn un_usuario_con_varios_roles_usa_el_mas_permisivo() {
        let usuario = usuario_con_roles(&["USUARIO", "ADMIN"]);
        assert!(
            verificar(&usuario, Productos::POLITICA.eliminacion, "productos", "eliminación")
                .is_ok()
        );
    }
}
