// src/services/roles.rs
//
// Registro de roles. Los roles son datos sembrados, no un enum cerrado: se
// buscan por nombre y se crean a demanda. El conjunto en la práctica es
// {SuperAdmin, Admin, Moderador, Usuario}, guardado siempre en mayúsculas.

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, db::RolRepository, models::auth::Rol};

pub const ROL_SUPERADMIN: &str = "SUPERADMIN";
pub const ROL_ADMIN: &str = "ADMIN";
pub const ROL_MODERADOR: &str = "MODERADOR";
pub const ROL_USUARIO: &str = "USUARIO";

// Normalización al escribir y al comparar: "Admin", " admin " y "ADMIN" son
// el mismo rol.
pub fn normalizar_rol(nombre: &str) -> String {
    nombre.trim().to_uppercase()
}

#[derive(Clone)]
pub struct RoleRegistry {
    repo: RolRepository,
}

impl RoleRegistry {
    pub fn new(repo: RolRepository) -> Self {
        Self { repo }
    }

    pub async fn get_or_create<'e, E>(&self, executor: E, nombre: &str) -> Result<Rol, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let nombre = normalizar_rol(nombre);
        self.repo.get_or_create(executor, &nombre).await
    }

    pub async fn roles_de(&self, usuario_id: i64) -> Result<Vec<String>, AppError> {
        self.repo.roles_de_usuario(usuario_id).await
    }

    pub async fn asignar<'e, E>(
        &self,
        executor: E,
        usuario_id: i64,
        rol_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.asignar_rol(executor, usuario_id, rol_id).await
    }

    pub async fn quitar(&self, usuario_id: i64, rol_id: i64) -> Result<(), AppError> {
        self.repo.quitar_rol(usuario_id, rol_id).await
    }

    // Siembra inicial, equivalente al comando `seed` del sistema viejo.
    // get_or_create la hace idempotente: correr el arranque dos veces no duplica nada.
    pub async fn sembrar_roles(&self, pool: &PgPool) -> Result<(), AppError> {
        for nombre in [ROL_SUPERADMIN, ROL_ADMIN, ROL_MODERADOR, ROL_USUARIO] {
            self.get_or_create(pool, nombre).await?;
        }
        tracing::info!("Roles base sembrados");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normaliza_a_mayusculas() {
        assert_eq!(normalizar_rol("Admin"), "ADMIN");
        assert_eq!(normalizar_rol("  moderador "), "MODERADOR");
        assert_eq!(normalizar_rol("USUARIO"), "USUARIO");
    }

    #[test]
    fn los_roles_sembrados_ya_estan_normalizados() {
        for nombre in [ROL_SUPERADMIN, ROL_ADMIN, ROL_MODERADOR, ROL_USUARIO] {
            assert_eq!(normalizar_rol(nombre), nombre);
        }
    }
}
