use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{evenement, plaats};
use diesel::dsl::count_star;
use diesel::prelude::*;
use primitives::{PrimitiveEvenement, PrimitivePlaats};
use serde::{Deserialize, Serialize};

pub const PLAATS_NOT_FOUND: &str = "Er bestaat geen plaats met dit Id";

/// A [`Plaats`] with every [`Evenement`](crate::Evenement) held there
#[derive(Clone, Debug, Serialize)]
pub struct Plaats {
	pub plaats:      PrimitivePlaats,
	pub evenementen: Vec<PrimitiveEvenement>,
}

/// A [`Plaats`] annotated with the amount of events held there
#[derive(Clone, Debug, Serialize)]
pub struct PlaatsOverview {
	pub plaats:             PrimitivePlaats,
	pub aantal_evenementen: i64,
}

/// Fail with not-found if no [`Plaats`] with the given id exists
///
/// Meant to be called inside a transaction
pub(crate) fn ensure_plaats_exists(
	conn: &mut PgConnection,
	plaats_id: i32,
) -> Result<(), Error> {
	let exists: bool =
		diesel::select(diesel::dsl::exists(plaats::table.find(plaats_id)))
			.get_result(conn)?;

	if !exists {
		return Err(Error::NotFound(PLAATS_NOT_FOUND.to_string()));
	}

	Ok(())
}

impl Plaats {
	/// Get a [`Plaats`] and its events given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(plaats_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let (plaats, evenementen) = conn
			.interact(move |conn| {
				let Some(plaats) = plaats::table
					.find(plaats_id)
					.select(PrimitivePlaats::as_select())
					.get_result(conn)
					.optional()?
				else {
					return Ok(None);
				};

				let evenementen = evenement::table
					.filter(evenement::plaats_id.eq(plaats_id))
					.order_by((evenement::datum, evenement::id))
					.select(PrimitiveEvenement::as_select())
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>(Some((plaats, evenementen)))
			})
			.await??
			.ok_or_else(|| Error::NotFound(PLAATS_NOT_FOUND.to_string()))?;

		Ok(Self { plaats, evenementen })
	}

	/// Get all [`Plaats`]en together with their event count
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<PlaatsOverview>, Error> {
		let (plaatsen, counts) = conn
			.interact(|conn| {
				let plaatsen = plaats::table
					.order_by(plaats::naam)
					.select(PrimitivePlaats::as_select())
					.get_results(conn)?;

				let counts: Vec<(i32, i64)> = evenement::table
					.group_by(evenement::plaats_id)
					.select((evenement::plaats_id, count_star()))
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>((plaatsen, counts))
			})
			.await??;

		let counts: HashMap<i32, i64> = counts.into_iter().collect();

		let overviews = plaatsen
			.into_iter()
			.map(|plaats| {
				let aantal_evenementen =
					counts.get(&plaats.id).copied().unwrap_or_default();

				PlaatsOverview { plaats, aantal_evenementen }
			})
			.collect();

		Ok(overviews)
	}

	/// Delete a [`Plaats`] given its id
	///
	/// Fails with a conflict while events still reference it
	#[instrument(skip(conn))]
	pub async fn delete_by_id(plaats_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				diesel::delete(plaats::table.find(plaats_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(PLAATS_NOT_FOUND.to_string()));
		}

		info!("deleted plaats with id {plaats_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = plaats)]
#[diesel(check_for_backend(Pg))]
pub struct NewPlaats {
	pub naam:       String,
	pub straat:     String,
	pub huisnummer: String,
	pub postcode:   String,
	pub gemeente:   String,
}

impl NewPlaats {
	/// Insert this [`NewPlaats`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Plaats, Error> {
		let plaats = conn
			.interact(|conn| {
				diesel::insert_into(plaats::table)
					.values(self)
					.returning(PrimitivePlaats::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created plaats {plaats:?}");

		Ok(Plaats { plaats, evenementen: vec![] })
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlaatsUpdate {
	pub naam:       String,
	pub straat:     String,
	pub huisnummer: String,
	pub postcode:   String,
	pub gemeente:   String,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = plaats)]
#[diesel(check_for_backend(Pg))]
struct InsertablePlaatsUpdate {
	naam:       String,
	straat:     String,
	huisnummer: String,
	postcode:   String,
	gemeente:   String,
	updated_at: NaiveDateTime,
}

impl PlaatsUpdate {
	/// Apply this update to the [`Plaats`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		plaats_id: i32,
		conn: &DbConn,
	) -> Result<Plaats, Error> {
		let update = InsertablePlaatsUpdate {
			naam:       self.naam,
			straat:     self.straat,
			huisnummer: self.huisnummer,
			postcode:   self.postcode,
			gemeente:   self.gemeente,
			updated_at: Utc::now().naive_utc(),
		};

		let updated = conn
			.interact(move |conn| {
				diesel::update(plaats::table.find(plaats_id))
					.set(update)
					.execute(conn)
			})
			.await??;

		if updated == 0 {
			return Err(Error::NotFound(PLAATS_NOT_FOUND.to_string()));
		}

		let plaats = Plaats::get_by_id(plaats_id, conn).await?;

		info!("updated plaats {plaats:?}");

		Ok(plaats)
	}
}
