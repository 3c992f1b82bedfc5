// src/services/auth.rs
//
// Almacén de credenciales + emisor de tokens. Las contraseñas nunca se
// guardan ni comparan en texto plano (bcrypt, verificación en tiempo
// constante). Los claims del access token se recalculan en CADA emisión:
// login y refresh vuelven a consultar roles y a resolver el negocio, nunca
// copian claims de un token anterior.

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EmpleadoRepository, NegocioRepository, UserRepository},
    models::{
        auth::{
            AccessTokenResponse, Claims, RefreshClaims, RegistroResponse, TokenPairResponse,
            Usuario,
        },
        empleado::Empleado,
    },
    services::{
        roles::{ROL_ADMIN, ROL_USUARIO, RoleRegistry},
        tenant::{Alcance, TenantResolver},
    },
};

const ACCESS_TOKEN_MINUTOS: i64 = 60;
const REFRESH_TOKEN_DIAS: i64 = 7;
const TOKEN_TYPE_REFRESH: &str = "refresh";

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    negocio_repo: NegocioRepository,
    empleado_repo: EmpleadoRepository,
    role_registry: RoleRegistry,
    resolver: TenantResolver,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        negocio_repo: NegocioRepository,
        empleado_repo: EmpleadoRepository,
        role_registry: RoleRegistry,
        resolver: TenantResolver,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            negocio_repo,
            empleado_repo,
            role_registry,
            resolver,
            jwt_secret,
            pool,
        }
    }

    // Registro de autoservicio: usuario + rol Admin + negocio propio vacío,
    // todo en una transacción. Si algo falla no queda un usuario a medio
    // aprovisionar (que es justo lo que después hace fallar la resolución
    // de negocio en el login).
    pub async fn registrar_propietario(
        &self,
        nombre: &str,
        apellido: &str,
        correo: &str,
        password: &str,
    ) -> Result<RegistroResponse, AppError> {
        let password_hash = hashear_password(password.to_owned()).await?;

        let mut tx = self.pool.begin().await?;

        let usuario = self
            .user_repo
            .crear_usuario(&mut *tx, nombre, apellido, correo, None, &password_hash)
            .await?;

        // El que se registra es dueño: rol Admin por defecto.
        let rol_admin = self.role_registry.get_or_create(&mut *tx, ROL_ADMIN).await?;
        self.role_registry
            .asignar(&mut *tx, usuario.id, rol_admin.id)
            .await?;

        // Negocio por defecto, vacío salvo el nombre.
        let negocio = self
            .negocio_repo
            .crear_negocio(&mut *tx, &format!("Negocio de {nombre}"), usuario.id)
            .await?;

        self.negocio_repo
            .conceder_visibilidad(&mut *tx, usuario.id, negocio.id)
            .await?;

        tx.commit().await?;

        tracing::info!(usuario_id = usuario.id, negocio_id = negocio.id, "Propietario registrado");

        Ok(RegistroResponse {
            mensaje: "Usuario registrado correctamente.".into(),
            negocio_id: negocio.id,
        })
    }

    // Alta de empleado (la inicia un Admin): cuenta + rol Usuario + registro
    // de empleo apuntando al negocio del Admin, en una transacción.
    pub async fn aprovisionar_empleado(
        &self,
        negocio_id: i64,
        nombre: &str,
        apellido: &str,
        correo: &str,
        password: &str,
        salario: Decimal,
    ) -> Result<Empleado, AppError> {
        let password_hash = hashear_password(password.to_owned()).await?;

        let mut tx = self.pool.begin().await?;

        let usuario = self
            .user_repo
            .crear_usuario(&mut *tx, nombre, apellido, correo, None, &password_hash)
            .await?;

        let rol_usuario = self
            .role_registry
            .get_or_create(&mut *tx, ROL_USUARIO)
            .await?;
        self.role_registry
            .asignar(&mut *tx, usuario.id, rol_usuario.id)
            .await?;

        let empleado = self
            .empleado_repo
            .crear_empleado(&mut *tx, usuario.id, negocio_id, nombre, apellido, salario)
            .await?;

        tx.commit().await?;

        tracing::info!(
            usuario_id = usuario.id,
            negocio_id,
            "Empleado aprovisionado"
        );

        Ok(empleado)
    }

    pub async fn login(&self, correo: &str, password: &str) -> Result<TokenPairResponse, AppError> {
        // Mismo error para correo inexistente y contraseña mala: la respuesta
        // no dice cuál de los dos falló.
        let usuario = self
            .user_repo
            .buscar_por_correo(correo)
            .await?
            .ok_or(AppError::CredencialesInvalidas)?;

        if !usuario.is_active {
            return Err(AppError::CredencialesInvalidas);
        }

        let password_valida =
            verificar_password(password.to_owned(), usuario.password_hash.clone()).await?;
        if !password_valida {
            return Err(AppError::CredencialesInvalidas);
        }

        let access_token = self.emitir_access_token(&usuario).await?;
        let refresh_token = self.emitir_refresh_token(usuario.id)?;

        Ok(TokenPairResponse {
            access_token,
            refresh_token,
        })
    }

    // Canjea un refresh token por un access token nuevo. Roles y negocio se
    // resuelven otra vez contra la base: si al usuario le cambiaron los roles
    // desde el login, el token nuevo lo refleja.
    pub async fn refrescar(&self, refresh_token: &str) -> Result<AccessTokenResponse, AppError> {
        let token_data = decode::<RefreshClaims>(
            refresh_token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::TokenInvalido)?;

        if token_data.claims.token_type != TOKEN_TYPE_REFRESH {
            return Err(AppError::TokenInvalido);
        }

        let usuario = self
            .user_repo
            .buscar_por_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::TokenInvalido)?;

        if !usuario.is_active {
            return Err(AppError::TokenInvalido);
        }

        let access_token = self.emitir_access_token(&usuario).await?;
        Ok(AccessTokenResponse { access_token })
    }

    // Valida un access token y devuelve sus claims. La identidad y el alcance
    // del request salen de acá; el guard de autorización decide con ellos.
    pub fn validar_access_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::TokenInvalido)?;

        Ok(token_data.claims)
    }

    // La emisión SIEMPRE consulta roles y resuelve el alcance en el momento.
    // Si el Admin no tiene negocio (o el empleado no tiene empleo) la emisión
    // entera falla: preferimos negar el login a emitir un token con un
    // negocio nulo.
    async fn emitir_access_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let roles = self.role_registry.roles_de(usuario.id).await?;
        let alcance = self.resolver.resolver(usuario.id, &roles).await?;

        let claims = construir_claims(usuario, roles, alcance, ACCESS_TOKEN_MINUTOS);

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }

    fn emitir_refresh_token(&self, usuario_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expira = now + chrono::Duration::days(REFRESH_TOKEN_DIAS);

        let claims = RefreshClaims {
            sub: usuario_id,
            jti: Uuid::new_v4(),
            token_type: TOKEN_TYPE_REFRESH.to_string(),
            exp: expira.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

fn construir_claims(
    usuario: &Usuario,
    roles: Vec<String>,
    alcance: Alcance,
    minutos: i64,
) -> Claims {
    let now = Utc::now();
    let expira = now + chrono::Duration::minutes(minutos);

    Claims {
        sub: usuario.id,
        nombre: format!("{} {}", usuario.nombre, usuario.apellido)
            .trim()
            .to_string(),
        correo: usuario.correo.clone(),
        roles,
        negocio: alcance.como_claim(),
        exp: expira.timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

// bcrypt es costoso a propósito: va a un thread aparte para no bloquear el
// runtime.
async fn hashear_password(password: String) -> Result<String, AppError> {
    let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falló la tarea de hashing: {e}"))??;
    Ok(password_hash)
}

async fn verificar_password(password: String, password_hash: String) -> Result<bool, AppError> {
    let valida = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falló la tarea de verificación: {e}"))??;
    Ok(valida)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::roles::{ROL_ADMIN, ROL_SUPERADMIN};
    use chrono::{DateTime, Utc};

    const SECRETO: &str = "secreto-de-prueba";

    fn usuario_de_prueba() -> Usuario {
        let ahora: DateTime<Utc> = Utc::now();
        Usuario {
            id: 31,
            nombre: "Ana".into(),
            apellido: "Gómez".into(),
            correo: "a@x.com".into(),
            telefono: None,
            password_hash: "irrelevante".into(),
            is_active: true,
            is_staff: false,
            fecha_creacion: ahora,
            fecha_modificacion: ahora,
        }
    }

    fn codificar(claims: &Claims) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(SECRETO.as_ref()),
        )
        .unwrap()
    }

    fn decodificar(token: &str) -> Claims {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(SECRETO.as_ref()),
            &Validation::default(),
        )
        .unwrap()
        .claims
    }

    #[test]
    fn los_claims_sobreviven_el_viaje_por_el_token() {
        let claims = construir_claims(
            &usuario_de_prueba(),
            vec![ROL_ADMIN.to_string()],
            Alcance::Negocio(7),
            60,
        );
        let recuperados = decodificar(&codificar(&claims));

        assert_eq!(recuperados.sub, 31);
        assert_eq!(recuperados.nombre, "Ana Gómez");
        assert_eq!(recuperados.correo, "a@x.com");
        assert_eq!(recuperados.roles, vec![ROL_ADMIN.to_string()]);
        assert_eq!(recuperados.negocio, 7);
    }

    #[test]
    fn el_superadmin_lleva_el_centinela_cero() {
        let claims = construir_claims(
            &usuario_de_prueba(),
            vec![ROL_SUPERADMIN.to_string()],
            Alcance::Plataforma,
            60,
        );
        assert_eq!(claims.negocio, 0);
    }

    #[test]
    fn un_token_con_otra_firma_no_valida() {
        let claims = construir_claims(&usuario_de_prueba(), vec![], Alcance::Negocio(1), 60);
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"otro-secreto"),
        )
        .unwrap();

        let resultado = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(SECRETO.as_ref()),
            &Validation::default(),
        );
        assert!(resultado.is_err());
    }

    #[tokio::test]
    async fn la_password_va_y_vuelve_por_bcrypt() {
        let hash = hashear_password("pw123456".into()).await.unwrap();
        assert_ne!(hash, "pw123456"); // jamás en texto plano

        assert!(verificar_password("pw123456".into(), hash.clone()).await.unwrap());
        assert!(!verificar_password("otra".into(), hash).await.unwrap());
    }
}
