// src/db/empleado_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::empleado::{Empleado, EmpleadoConCuenta},
};

const COLUMNAS_EMPLEADO: &str = "id, usuario_id, negocio_id, nombre, apellido, salario";

#[derive(Clone)]
pub struct EmpleadoRepository {
    pool: PgPool,
}

impl EmpleadoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Rama "empleado" del resolutor de alcance: de qué negocio es empleado
    // este usuario. La búsqueda es SIEMPRE por usuario_id (en el sistema viejo
    // esta consulta estaba repetida por vista y a veces con la clave equivocada).
    pub async fn negocio_de_empleado(&self, usuario_id: i64) -> Result<Option<i64>, AppError> {
        let fila: Option<(i64,)> =
            sqlx::query_as("SELECT negocio_id FROM empleados WHERE usuario_id = $1")
                .bind(usuario_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(fila.map(|(negocio_id,)| negocio_id))
    }

    pub async fn crear_empleado<'e, E>(
        &self,
        executor: E,
        usuario_id: i64,
        negocio_id: i64,
        nombre: &str,
        apellido: &str,
        salario: Decimal,
    ) -> Result<Empleado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO empleados (usuario_id, negocio_id, nombre, apellido, salario) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNAS_EMPLEADO}"
        );
        let empleado = sqlx::query_as::<_, Empleado>(&sql)
            .bind(usuario_id)
            .bind(negocio_id)
            .bind(nombre)
            .bind(apellido)
            .bind(salario)
            .fetch_one(executor)
            .await?;
        Ok(empleado)
    }

    pub async fn listar_por_negocio(
        &self,
        negocio_id: i64,
    ) -> Result<Vec<EmpleadoConCuenta>, AppError> {
        let empleados = sqlx::query_as::<_, EmpleadoConCuenta>(
            "SELECT e.id, e.usuario_id, e.negocio_id, e.nombre, e.apellido, e.salario, u.correo \
             FROM empleados e \
             JOIN usuarios u ON u.id = e.usuario_id \
             WHERE e.negocio_id = $1 \
             ORDER BY e.id",
        )
        .bind(negocio_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(empleados)
    }

    pub async fn obtener(&self, id: i64, negocio_id: i64) -> Result<Empleado, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_EMPLEADO} FROM empleados WHERE id = $1 AND negocio_id = $2"
        );
        sqlx::query_as::<_, Empleado>(&sql)
            .bind(id)
            .bind(negocio_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn actualizar(
        &self,
        id: i64,
        negocio_id: i64,
        nombre: Option<&str>,
        apellido: Option<&str>,
        salario: Option<Decimal>,
    ) -> Result<Empleado, AppError> {
        let sql = format!(
            "UPDATE empleados SET \
                nombre   = COALESCE($3, nombre), \
                apellido = COALESCE($4, apellido), \
                salario  = COALESCE($5, salario) \
             WHERE id = $1 AND negocio_id = $2 \
             RETURNING {COLUMNAS_EMPLEADO}"
        );
        sqlx::query_as::<_, Empleado>(&sql)
            .bind(id)
            .bind(negocio_id)
            .bind(nombre)
            .bind(apellido)
            .bind(salario)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, negocio_id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM empleados WHERE id = $1 AND negocio_id = $2")
            .bind(id)
            .bind(negocio_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NoEncontrado);
        }
        Ok(())
    }
}
