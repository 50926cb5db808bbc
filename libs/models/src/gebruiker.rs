use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error, LoginError};
use db::{Rol, canonical_roles, gebruiker};
use diesel::prelude::*;
use primitives::PrimitiveGebruiker;
use serde::{Deserialize, Serialize};

pub const GEBRUIKER_NOT_FOUND: &str = "Er bestaat geen gebruiker met dit Id";

#[derive(Clone, Debug, Serialize)]
pub struct Gebruiker {
	pub gebruiker: PrimitiveGebruiker,
}

/// Fail with not-found if no [`Gebruiker`] with the given id exists
///
/// Meant to be called inside a transaction
pub(crate) fn ensure_gebruiker_exists(
	conn: &mut PgConnection,
	gebruiker_id: i32,
) -> Result<(), Error> {
	let exists: bool = diesel::select(diesel::dsl::exists(
		gebruiker::table.find(gebruiker_id),
	))
	.get_result(conn)?;

	if !exists {
		return Err(Error::NotFound(GEBRUIKER_NOT_FOUND.to_string()));
	}

	Ok(())
}

impl Gebruiker {
	/// Get a [`Gebruiker`] given its id
	#[instrument(skip(conn))]
	pub async fn get(gebruiker_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let gebruiker = conn
			.interact(move |conn| {
				gebruiker::table
					.find(gebruiker_id)
					.select(PrimitiveGebruiker::as_select())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(GEBRUIKER_NOT_FOUND.to_string()))?;

		Ok(Self { gebruiker })
	}

	/// Get a [`Gebruiker`] given its naam
	#[instrument(skip(conn))]
	pub async fn get_by_naam(
		query_naam: String,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let lookup = query_naam.clone();

		let gebruiker = conn
			.interact(move |conn| {
				gebruiker::table
					.filter(gebruiker::naam.eq(lookup))
					.select(PrimitiveGebruiker::as_select())
					.first(conn)
					.optional()
			})
			.await??
			.ok_or(LoginError::UnknownNaam(query_naam))?;

		Ok(Self { gebruiker })
	}

	/// Get a list of all [`Gebruiker`]s
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let gebruikers = conn
			.interact(|conn| {
				gebruiker::table
					.order_by(gebruiker::id)
					.select(PrimitiveGebruiker::as_select())
					.get_results(conn)
			})
			.await??
			.into_iter()
			.map(|gebruiker| Self { gebruiker })
			.collect();

		Ok(gebruikers)
	}

	/// Delete a [`Gebruiker`] given its id
	///
	/// Fails with a conflict while the gebruiker is still the author of any
	/// event
	#[instrument(skip(conn))]
	pub async fn delete_by_id(
		gebruiker_id: i32,
		conn: &DbConn,
	) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				diesel::delete(gebruiker::table.find(gebruiker_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(GEBRUIKER_NOT_FOUND.to_string()));
		}

		info!("deleted gebruiker with id {gebruiker_id}");

		Ok(())
	}

	/// Check if this gebruiker holds the given role
	#[must_use]
	pub fn has_role(&self, rol: Rol) -> bool { self.gebruiker.has_role(rol) }

	/// Hash a password using Argon2
	pub fn hash_password(password: &str) -> Result<String, Error> {
		let salt = SaltString::generate(&mut OsRng);
		let hashed_password = Argon2::default()
			.hash_password(password.as_bytes(), &salt)?
			.to_string();

		Ok(hashed_password)
	}

	/// Verify a password against the stored hash of this [`Gebruiker`]
	pub fn verify_password(&self, password: &str) -> Result<(), Error> {
		let password_hash = PasswordHash::new(&self.gebruiker.password_hash)?;

		Argon2::default().verify_password(password.as_bytes(), &password_hash)?;

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewGebruiker {
	pub naam:       String,
	pub wachtwoord: String,
	pub roles:      Vec<Rol>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = gebruiker)]
#[diesel(check_for_backend(Pg))]
struct InsertableNewGebruiker {
	naam:          String,
	password_hash: String,
	roles:         Vec<Rol>,
}

impl NewGebruiker {
	/// Insert this [`NewGebruiker`]
	#[instrument(skip_all)]
	pub async fn insert(self, conn: &DbConn) -> Result<Gebruiker, Error> {
		let password_hash = Gebruiker::hash_password(&self.wachtwoord)?;

		let insertable = InsertableNewGebruiker {
			naam: self.naam,
			password_hash,
			roles: canonical_roles(self.roles),
		};

		let gebruiker = conn
			.interact(|conn| {
				diesel::insert_into(gebruiker::table)
					.values(insertable)
					.returning(PrimitiveGebruiker::as_returning())
					.get_result(conn)
			})
			.await??;

		info!(
			"registered gebruiker id: {} naam: {}",
			gebruiker.id, gebruiker.naam
		);

		Ok(Gebruiker { gebruiker })
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GebruikerUpdate {
	pub naam:       Option<String>,
	pub wachtwoord: Option<String>,
	pub roles:      Option<Vec<Rol>>,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = gebruiker)]
#[diesel(check_for_backend(Pg))]
struct InsertableGebruikerUpdate {
	naam:          Option<String>,
	password_hash: Option<String>,
	roles:         Option<Vec<Rol>>,
	updated_at:    NaiveDateTime,
}

impl GebruikerUpdate {
	/// Apply this update to the [`Gebruiker`] with the given id
	#[instrument(skip_all)]
	pub async fn apply_to(
		self,
		gebruiker_id: i32,
		conn: &DbConn,
	) -> Result<Gebruiker, Error> {
		let password_hash = self
			.wachtwoord
			.as_deref()
			.map(Gebruiker::hash_password)
			.transpose()?;

		let update = InsertableGebruikerUpdate {
			naam: self.naam,
			password_hash,
			roles: self.roles.map(canonical_roles),
			updated_at: Utc::now().naive_utc(),
		};

		let gebruiker = conn
			.interact(move |conn| {
				diesel::update(gebruiker::table.find(gebruiker_id))
					.set(update)
					.returning(PrimitiveGebruiker::as_returning())
					.get_result(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| Error::NotFound(GEBRUIKER_NOT_FOUND.to_string()))?;

		info!("updated gebruiker {}", gebruiker.id);

		Ok(Gebruiker { gebruiker })
	}
}
