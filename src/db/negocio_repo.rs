// src/db/negocio_repo.rs

use chrono::Utc;
use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::negocio::{Negocio, TipoNegocio},
};

const COLUMNAS_NEGOCIO: &str = "id, nombre_negocio, direccion, telefono, correo, \
     fecha_creacion, tipo_negocio_id, propietario_id";

#[derive(Clone)]
pub struct NegocioRepository {
    pool: PgPool,
}

impl NegocioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Búsqueda por propietario: es la rama "dueño" del resolutor de alcance.
    // Si hay más de un negocio con el mismo dueño (la convención de flujo crea
    // uno solo, el esquema no lo fuerza) se toma el más antiguo.
    pub async fn buscar_por_propietario(
        &self,
        propietario_id: i64,
    ) -> Result<Option<Negocio>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_NEGOCIO} FROM negocios \
             WHERE propietario_id = $1 ORDER BY id LIMIT 1"
        );
        let maybe_negocio = sqlx::query_as::<_, Negocio>(&sql)
            .bind(propietario_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_negocio)
    }

    pub async fn buscar_por_id(&self, id: i64) -> Result<Option<Negocio>, AppError> {
        let sql = format!("SELECT {COLUMNAS_NEGOCIO} FROM negocios WHERE id = $1");
        let maybe_negocio = sqlx::query_as::<_, Negocio>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_negocio)
    }

    // Negocio por defecto del registro: vacío salvo el nombre y el dueño.
    pub async fn crear_negocio<'e, E>(
        &self,
        executor: E,
        nombre_negocio: &str,
        propietario_id: i64,
    ) -> Result<Negocio, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO negocios (nombre_negocio, fecha_creacion, propietario_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNAS_NEGOCIO}"
        );
        let negocio = sqlx::query_as::<_, Negocio>(&sql)
            .bind(nombre_negocio)
            .bind(Utc::now().date_naive())
            .bind(propietario_id)
            .fetch_one(executor)
            .await?;
        Ok(negocio)
    }

    pub async fn actualizar_negocio(
        &self,
        id: i64,
        nombre_negocio: Option<&str>,
        direccion: Option<&str>,
        telefono: Option<&str>,
        correo: Option<&str>,
        tipo_negocio_id: Option<i64>,
    ) -> Result<Negocio, AppError> {
        let sql = format!(
            "UPDATE negocios SET \
                nombre_negocio  = COALESCE($2, nombre_negocio), \
                direccion       = COALESCE($3, direccion), \
                telefono        = COALESCE($4, telefono), \
                correo          = COALESCE($5, correo), \
                tipo_negocio_id = COALESCE($6, tipo_negocio_id) \
             WHERE id = $1 \
             RETURNING {COLUMNAS_NEGOCIO}"
        );
        let negocio = sqlx::query_as::<_, Negocio>(&sql)
            .bind(id)
            .bind(nombre_negocio)
            .bind(direccion)
            .bind(telefono)
            .bind(correo)
            .bind(tipo_negocio_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)?;
        Ok(negocio)
    }

    // Negocios visibles para un usuario vía la concesión usuario_negocio
    // (distinta de ser dueño o empleado).
    pub async fn negocios_visibles(&self, usuario_id: i64) -> Result<Vec<Negocio>, AppError> {
        let negocios = sqlx::query_as::<_, Negocio>(
            "SELECT n.id, n.nombre_negocio, n.direccion, n.telefono, n.correo, \
                    n.fecha_creacion, n.tipo_negocio_id, n.propietario_id \
             FROM negocios n \
             JOIN usuario_negocio un ON un.negocio_id = n.id \
             WHERE un.usuario_id = $1 \
             ORDER BY n.id",
        )
            .bind(usuario_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(negocios)
    }

    pub async fn conceder_visibilidad<'e, E>(
        &self,
        executor: E,
        usuario_id: i64,
        negocio_id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "INSERT INTO usuario_negocio (usuario_id, negocio_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(usuario_id)
        .bind(negocio_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Tipos de negocio: catálogo global, no pertenece a ningún tenant.
    // ------------------------------------------------------------------

    pub async fn crear_tipo_negocio(
        &self,
        nombre: &str,
        descripcion: &str,
    ) -> Result<TipoNegocio, AppError> {
        let tipo = sqlx::query_as::<_, TipoNegocio>(
            "INSERT INTO tipos_negocio (nombre_tipo_negocio, descripcion) \
             VALUES ($1, $2) \
             RETURNING id, nombre_tipo_negocio, descripcion",
        )
        .bind(nombre)
        .bind(descripcion)
        .fetch_one(&self.pool)
        .await?;
        Ok(tipo)
    }

    pub async fn listar_tipos_negocio(&self) -> Result<Vec<TipoNegocio>, AppError> {
        let tipos = sqlx::query_as::<_, TipoNegocio>(
            "SELECT id, nombre_tipo_negocio, descripcion FROM tipos_negocio ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tipos)
    }

    pub async fn obtener_tipo_negocio(&self, id: i64) -> Result<TipoNegocio, AppError> {
        sqlx::query_as::<_, TipoNegocio>(
            "SELECT id, nombre_tipo_negocio, descripcion FROM tipos_negocio WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NoEncontrado)
    }

    pub async fn actualizar_tipo_negocio(
        &self,
        id: i64,
        nombre: Option<&str>,
        descripcion: Option<&str>,
    ) -> Result<TipoNegocio, AppError> {
        sqlx::query_as::<_, TipoNegocio>(
            "UPDATE tipos_negocio SET \
                nombre_tipo_negocio = COALESCE($2, nombre_tipo_negocio), \
                descripcion         = COALESCE($3, descripcion) \
             WHERE id = $1 \
             RETURNING id, nombre_tipo_negocio, descripcion",
        )
        .bind(id)
        .bind(nombre)
        .bind(descripcion)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar_tipo_negocio(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tipos_negocio WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NoEncontrado);
        }
        Ok(())
    }
}
