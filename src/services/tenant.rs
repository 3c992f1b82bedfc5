// src/services/tenant.rs
//
// Resolución de alcance (tenant). En el sistema viejo esta lógica de tres
// ramas estaba copiada y pegada en cada vista, cada copia con su propio bug.
// Acá existe UNA sola vez: `decidir_alcance` es la decisión pura y
// `TenantResolver` el servicio que junta los datos y la invoca. Todo el mundo
// pasa por acá.

use serde::{Deserialize, Serialize};

use crate::{
    common::error::AppError,
    db::{EmpleadoRepository, NegocioRepository},
    services::roles::{ROL_ADMIN, ROL_SUPERADMIN, normalizar_rol},
};

// Valor del claim `negocio` que significa "alcance de plataforma": no es un
// negocio real, es el centinela del SuperAdmin.
pub const NEGOCIO_PLATAFORMA: i64 = 0;

// El alcance resuelto de una identidad autenticada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alcance {
    // Ve todos los negocios (SuperAdmin). En el token viaja como 0.
    Plataforma,
    // Limitado a un negocio concreto: el propio o el que lo emplea.
    Negocio(i64),
}

impl Alcance {
    pub fn desde_claim(valor: i64) -> Self {
        if valor == NEGOCIO_PLATAFORMA {
            Alcance::Plataforma
        } else {
            Alcance::Negocio(valor)
        }
    }

    pub fn como_claim(&self) -> i64 {
        match self {
            Alcance::Plataforma => NEGOCIO_PLATAFORMA,
            Alcance::Negocio(id) => *id,
        }
    }

    // Filtro para las consultas: None levanta el filtro (plataforma).
    pub fn filtro(&self) -> Option<i64> {
        match self {
            Alcance::Plataforma => None,
            Alcance::Negocio(id) => Some(*id),
        }
    }

    // Negocio destino de una escritura. Las operaciones que crean registros
    // necesitan un negocio concreto; el alcance de plataforma no lo da.
    pub fn negocio_objetivo(&self) -> Result<i64, AppError> {
        match self {
            Alcance::Negocio(id) => Ok(*id),
            Alcance::Plataforma => Err(AppError::AccesoDenegado(
                "la operación requiere un negocio concreto y el alcance es de plataforma".into(),
            )),
        }
    }
}

fn tiene_rol(roles: &[String], buscado: &str) -> bool {
    roles.iter().any(|r| normalizar_rol(r) == buscado)
}

// La decisión de alcance, pura y determinista. Prioridad fija:
// SuperAdmin > Admin (propietario) > empleado. Si ninguna rama cierra, el
// resultado es un error duro: "sin negocio" jamás se trata como "lista vacía".
pub fn decidir_alcance(
    roles: &[String],
    negocio_propio: Option<i64>,
    negocio_empleo: Option<i64>,
) -> Result<Alcance, AppError> {
    if tiene_rol(roles, ROL_SUPERADMIN) {
        return Ok(Alcance::Plataforma);
    }

    if tiene_rol(roles, ROL_ADMIN) {
        // Rol Admin = propietario. Que no tenga negocio es un problema de
        // aprovisionamiento, no un caso recuperable.
        return negocio_propio.map(Alcance::Negocio).ok_or_else(|| {
            AppError::ResolucionDeNegocio("usuario con rol Admin sin negocio propio".into())
        });
    }

    // Cualquier otro rol (Usuario, Moderador) resuelve por la relación de
    // empleo o falla.
    negocio_empleo.map(Alcance::Negocio).ok_or_else(|| {
        AppError::ResolucionDeNegocio("usuario sin registro de empleo en ningún negocio".into())
    })
}

#[derive(Clone)]
pub struct TenantResolver {
    negocio_repo: NegocioRepository,
    empleado_repo: EmpleadoRepository,
}

impl TenantResolver {
    pub fn new(negocio_repo: NegocioRepository, empleado_repo: EmpleadoRepository) -> Self {
        Self {
            negocio_repo,
            empleado_repo,
        }
    }

    // Junta los hechos (negocio propio, negocio que lo emplea) y delega la
    // decisión en `decidir_alcance`.
    pub async fn resolver(&self, usuario_id: i64, roles: &[String]) -> Result<Alcance, AppError> {
        let negocio_propio = self
            .negocio_repo
            .buscar_por_propietario(usuario_id)
            .await?
            .map(|n| n.id);
        let negocio_empleo = self.empleado_repo.negocio_de_empleado(usuario_id).await?;

        decidir_alcance(roles, negocio_propio, negocio_empleo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::roles::{ROL_MODERADOR, ROL_USUARIO};

    fn roles(nombres: &[&str]) -> Vec<String> {
        nombres.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn superadmin_siempre_resuelve_a_plataforma() {
        // Aunque tenga negocio propio y empleo, gana el centinela.
        let alcance = decidir_alcance(&roles(&[ROL_SUPERADMIN]), Some(5), Some(9)).unwrap();
        assert_eq!(alcance, Alcance::Plataforma);
        assert_eq!(alcance.como_claim(), NEGOCIO_PLATAFORMA);
    }

    #[test]
    fn superadmin_tiene_prioridad_sobre_admin() {
        let alcance = decidir_alcance(&roles(&[ROL_ADMIN, ROL_SUPERADMIN]), Some(5), None).unwrap();
        assert_eq!(alcance, Alcance::Plataforma);
    }

    #[test]
    fn admin_resuelve_a_su_negocio() {
        let alcance = decidir_alcance(&roles(&[ROL_ADMIN]), Some(42), None).unwrap();
        assert_eq!(alcance, Alcance::Negocio(42));
    }

    #[test]
    fn admin_sin_negocio_es_error_de_resolucion() {
        let err = decidir_alcance(&roles(&[ROL_ADMIN]), None, Some(9)).unwrap_err();
        assert!(matches!(err, AppError::ResolucionDeNegocio(_)));
    }

    #[test]
    fn empleado_resuelve_por_su_empleo() {
        let alcance = decidir_alcance(&roles(&[ROL_USUARIO]), None, Some(7)).unwrap();
        assert_eq!(alcance, Alcance::Negocio(7));
    }

    #[test]
    fn empleado_sin_empleo_es_error_de_resolucion() {
        let err = decidir_alcance(&roles(&[ROL_USUARIO]), None, None).unwrap_err();
        assert!(matches!(err, AppError::ResolucionDeNegocio(_)));
    }

    #[test]
    fn moderador_resuelve_por_la_rama_de_empleo() {
        // Decisión registrada: Moderador sin empleo falla, no hay alcance
        // especial de "moderador de plataforma".
        let alcance = decidir_alcance(&roles(&[ROL_MODERADOR]), None, Some(3)).unwrap();
        assert_eq!(alcance, Alcance::Negocio(3));

        let err = decidir_alcance(&roles(&[ROL_MODERADOR]), None, None).unwrap_err();
        assert!(matches!(err, AppError::ResolucionDeNegocio(_)));
    }

    #[test]
    fn sin_roles_resuelve_por_empleo_o_falla() {
        let err = decidir_alcance(&[], None, None).unwrap_err();
        assert!(matches!(err, AppError::ResolucionDeNegocio(_)));
    }

    #[test]
    fn los_roles_se_comparan_sin_distinguir_mayusculas() {
        let alcance = decidir_alcance(&roles(&["Admin"]), Some(11), None).unwrap();
        assert_eq!(alcance, Alcance::Negocio(11));
    }

    #[test]
    fn claim_y_alcance_van_y_vuelven() {
        assert_eq!(Alcance::desde_claim(0), Alcance::Plataforma);
        assert_eq!(Alcance::desde_claim(7), Alcance::Negocio(7));
        assert_eq!(Alcance::Negocio(7).como_claim(), 7);
    }

    #[test]
    fn plataforma_no_es_negocio_objetivo() {
        assert!(Alcance::Plataforma.negocio_objetivo().is_err());
        assert_eq!(Alcance::Negocio(3).negocio_objetivo().unwrap(), 3);
    }

    #[test]
    fn el_filtro_de_plataforma_levanta_el_alcance() {
        assert_eq!(Alcance::Plataforma.filtro(), None);
        assert_eq!(Alcance::Negocio(8).filtro(), Some(8));
    }
}
