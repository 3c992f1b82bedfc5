// src/db/proveedor_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::proveedor::Proveedor};

const COLUMNAS_PROVEEDOR: &str =
    "id, negocio_id, nombre, telefono, correo, direccion, tipo_proveedor";

#[derive(Clone)]
pub struct ProveedorRepository {
    pool: PgPool,
}

impl ProveedorRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn listar(&self, filtro_negocio: Option<i64>) -> Result<Vec<Proveedor>, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_PROVEEDOR} FROM proveedores \
             WHERE ($1::BIGINT IS NULL OR negocio_id = $1) ORDER BY id"
        );
        let proveedores = sqlx::query_as::<_, Proveedor>(&sql)
            .bind(filtro_negocio)
            .fetch_all(&self.pool)
            .await?;
        Ok(proveedores)
    }

    pub async fn obtener(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
    ) -> Result<Proveedor, AppError> {
        let sql = format!(
            "SELECT {COLUMNAS_PROVEEDOR} FROM proveedores \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)"
        );
        sqlx::query_as::<_, Proveedor>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn crear<'e, E>(
        &self,
        executor: E,
        negocio_id: i64,
        nombre: &str,
        telefono: &str,
        correo: &str,
        direccion: &str,
        tipo_proveedor: &str,
    ) -> Result<Proveedor, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!(
            "INSERT INTO proveedores \
                (negocio_id, nombre, telefono, correo, direccion, tipo_proveedor) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNAS_PROVEEDOR}"
        );
        let proveedor = sqlx::query_as::<_, Proveedor>(&sql)
            .bind(negocio_id)
            .bind(nombre)
            .bind(telefono)
            .bind(correo)
            .bind(direccion)
            .bind(tipo_proveedor)
            .fetch_one(executor)
            .await?;
        Ok(proveedor)
    }

    // Vincula los productos que surte el proveedor. El INSERT sale de un
    // SELECT filtrado por negocio: un id de otro negocio (o inexistente) no
    // produce fila, y el faltante se reporta como el mismo 404 de siempre.
    pub async fn vincular_productos<'e, E>(
        &self,
        executor: E,
        proveedor_id: i64,
        negocio_id: i64,
        producto_ids: &[i64],
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = ids_unicos(producto_ids);
        let result = sqlx::query(
            "INSERT INTO proveedor_productos (proveedor_id, producto_id) \
             SELECT $1, p.id FROM productos p \
             WHERE p.id = ANY($2) AND p.negocio_id = $3 \
             ON CONFLICT DO NOTHING",
        )
        .bind(proveedor_id)
        .bind(&ids)
        .bind(negocio_id)
        .execute(executor)
        .await?;

        verificar_vinculos(ids.len(), result.rows_affected())
    }

    pub async fn productos_de_proveedor(&self, proveedor_id: i64) -> Result<Vec<i64>, AppError> {
        let filas: Vec<(i64,)> = sqlx::query_as(
            "SELECT producto_id FROM proveedor_productos WHERE proveedor_id = $1 ORDER BY producto_id",
        )
        .bind(proveedor_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(filas.into_iter().map(|(id,)| id).collect())
    }

    pub async fn actualizar(
        &self,
        id: i64,
        filtro_negocio: Option<i64>,
        nombre: Option<&str>,
        telefono: Option<&str>,
        correo: Option<&str>,
        direccion: Option<&str>,
        tipo_proveedor: Option<&str>,
    ) -> Result<Proveedor, AppError> {
        let sql = format!(
            "UPDATE proveedores SET \
                nombre         = COALESCE($3, nombre), \
                telefono       = COALESCE($4, telefono), \
                correo         = COALESCE($5, correo), \
                direccion      = COALESCE($6, direccion), \
                tipo_proveedor = COALESCE($7, tipo_proveedor) \
             WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2) \
             RETURNING {COLUMNAS_PROVEEDOR}"
        );
        sqlx::query_as::<_, Proveedor>(&sql)
            .bind(id)
            .bind(filtro_negocio)
            .bind(nombre)
            .bind(telefono)
            .bind(correo)
            .bind(direccion)
            .bind(tipo_proveedor)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NoEncontrado)
    }

    pub async fn eliminar(&self, id: i64, filtro_negocio: Option<i64>) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM proveedores WHERE id = $1 AND ($2::BIGINT IS NULL OR negocio_id = $2)",
        )
        .bind(id)
        .bind(filtro_negocio)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NoEncontrado);
        }
        Ok(())
    }
}

// El INSERT..SELECT inserta a lo sumo una fila por producto: los ids pedidos
// se cuentan sin repetidos para poder comparar contra las filas insertadas.
fn ids_unicos(producto_ids: &[i64]) -> Vec<i64> {
    let mut ids = producto_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// Menos filas insertadas que ids pedidos: algún producto no era del negocio
// del proveedor, o no existe. Mismo 404 que un recurso ausente.
fn verificar_vinculos(pedidos: usize, insertados: u64) -> Result<(), AppError> {
    if insertados < pedidos as u64 {
        return Err(AppError::NoEncontrado);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn los_ids_repetidos_cuentan_una_sola_vez() {
        assert_eq!(ids_unicos(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
        assert!(ids_unicos(&[]).is_empty());
    }

    #[test]
    fn un_vinculo_faltante_es_no_encontrado() {
        // Dos ids pedidos y una sola fila insertada: el otro producto era de
        // otro negocio o no existe.
        let err = verificar_vinculos(2, 1).unwrap_err();
        assert!(matches!(err, AppError::NoEncontrado));

        assert!(verificar_vinculos(2, 2).is_ok());
        assert!(verificar_vinculos(0, 0).is_ok());
    }
}
