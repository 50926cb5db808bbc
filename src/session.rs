//! Gebruiker sessions and bearer tokens

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common::{Error, InternalServerError, RedisConn};
use db::Rol;
use models::Gebruiker;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::{AppState, Config};

/// The session of an authenticated gebruiker
///
/// Only available in controllers behind a non-public
/// [`PolicyLayer`](crate::middleware::PolicyLayer)
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.gebruiker_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Session {
	pub id:           Uuid,
	pub gebruiker_id: i32,
	/// Roles of the gebruiker as currently stored, not as they were at login
	pub roles:        Vec<Rol>,
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		_state: &AppState,
	) -> Result<Self, Self::Rejection> {
		parts
			.extensions
			.get::<Self>()
			.cloned()
			.ok_or_else(|| InternalServerError::SessionWithoutAuthError.into())
	}
}

impl Session {
	/// Create and store a new [`Session`] for a given [`Gebruiker`]
	#[instrument(skip_all)]
	pub async fn create(
		config: &Config,
		gebruiker: &Gebruiker,
		conn: &mut RedisConn,
	) -> Result<Self, Error> {
		let id = Uuid::new_v4();
		let gebruiker_id = gebruiker.gebruiker.id;

		let session =
			Self { id, gebruiker_id, roles: gebruiker.gebruiker.roles.clone() };

		let expiry = config.access_token_lifetime.num_seconds();

		let _: () = conn.set(id, gebruiker_id).await?;
		let _: () = conn.expire(id, expiry).await?;

		debug!("stored session {id} in cache for gebruiker {gebruiker_id}");

		Ok(session)
	}

	/// Get the id of the gebruiker a session belongs to
	#[instrument(skip(conn))]
	pub async fn get_gebruiker_id(
		id: Uuid,
		conn: &mut RedisConn,
	) -> Result<Option<i32>, Error> {
		let gebruiker_id: Option<i32> = conn.get(id).await?;

		Ok(gebruiker_id)
	}

	/// Remove a session given its id
	#[instrument(skip(conn))]
	pub async fn delete(id: Uuid, conn: &mut RedisConn) -> Result<(), Error> {
		let _: i32 = conn.del(id).await?;

		Ok(())
	}

	/// Check if the gebruiker of this session holds the given role
	#[must_use]
	pub fn has_role(&self, rol: Rol) -> bool { self.roles.contains(&rol) }

	#[must_use]
	pub fn is_admin(&self) -> bool { self.has_role(Rol::Admin) }
}
