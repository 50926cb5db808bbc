use std::collections::HashMap;

use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{evenement, gebruiker, gereedschap, plaats};
use diesel::prelude::*;
use primitives::{
	PrimitiveEvenement,
	PrimitiveGebruiker,
	PrimitiveGereedschap,
	PrimitivePlaats,
};
use serde::{Deserialize, Serialize};

use crate::gebruiker::ensure_gebruiker_exists;
use crate::linkage;
use crate::plaats::ensure_plaats_exists;

pub const EVENEMENT_NOT_FOUND: &str = "Er bestaat geen evenement met dit Id";

pub type JoinedEvenementData =
	(PrimitiveEvenement, PrimitivePlaats, PrimitiveGebruiker);

/// An [`Evenement`] with its venue, author and linked tools
#[derive(Clone, Debug, Serialize)]
pub struct Evenement {
	pub evenement:      PrimitiveEvenement,
	pub plaats:         PrimitivePlaats,
	pub auteur:         PrimitiveGebruiker,
	pub gereedschappen: Vec<PrimitiveGereedschap>,
}

/// Fail with not-found if no [`Evenement`] with the given id exists, locking
/// its row otherwise
///
/// Meant to be called inside a transaction
fn lock_evenement(conn: &mut PgConnection, ev_id: i32) -> Result<(), Error> {
	evenement::table
		.find(ev_id)
		.select(evenement::id)
		.for_update()
		.get_result::<i32>(conn)
		.optional()?
		.ok_or_else(|| Error::NotFound(EVENEMENT_NOT_FOUND.to_string()))?;

	Ok(())
}

impl Evenement {
	/// Build a query with all required joins to select a full event data
	/// tuple
	#[diesel::dsl::auto_type(no_type_alias)]
	fn joined_query() -> _ {
		evenement::table.inner_join(plaats::table).inner_join(gebruiker::table)
	}

	/// Construct a full [`Evenement`] struct from the data returned by a
	/// joined query
	fn from_joined(
		data: JoinedEvenementData,
		gereedschappen: Vec<PrimitiveGereedschap>,
	) -> Self {
		Self {
			evenement: data.0,
			plaats: data.1,
			auteur: data.2,
			gereedschappen,
		}
	}

	/// Get an [`Evenement`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(ev_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let (data, gereedschappen) = conn
			.interact(move |conn| {
				let Some(data) = query
					.filter(evenement::id.eq(ev_id))
					.select((
						PrimitiveEvenement::as_select(),
						PrimitivePlaats::as_select(),
						PrimitiveGebruiker::as_select(),
					))
					.get_result::<JoinedEvenementData>(conn)
					.optional()?
				else {
					return Ok(None);
				};

				let gereedschappen = gereedschap::table
					.filter(gereedschap::evenement_id.eq(ev_id))
					.order_by(gereedschap::id)
					.select(PrimitiveGereedschap::as_select())
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>(Some((data, gereedschappen)))
			})
			.await??
			.ok_or_else(|| Error::NotFound(EVENEMENT_NOT_FOUND.to_string()))?;

		Ok(Self::from_joined(data, gereedschappen))
	}

	/// Get all [`Evenement`]en ordered by date
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let (evenementen, gereedschappen) = conn
			.interact(move |conn| {
				let evenementen = query
					.order_by((evenement::datum, evenement::id))
					.select((
						PrimitiveEvenement::as_select(),
						PrimitivePlaats::as_select(),
						PrimitiveGebruiker::as_select(),
					))
					.get_results::<JoinedEvenementData>(conn)?;

				let gereedschappen = gereedschap::table
					.filter(gereedschap::evenement_id.is_not_null())
					.order_by(gereedschap::id)
					.select(PrimitiveGereedschap::as_select())
					.get_results(conn)?;

				Ok::<_, diesel::result::Error>((evenementen, gereedschappen))
			})
			.await??;

		let evenementen = Self::group(evenementen, gereedschappen);

		Ok(evenementen)
	}

	/// Attach every tool to the event it is linked to
	fn group(
		evenementen: Vec<JoinedEvenementData>,
		gereedschappen: Vec<PrimitiveGereedschap>,
	) -> Vec<Self> {
		let mut per_evenement: HashMap<i32, Vec<PrimitiveGereedschap>> =
			HashMap::new();

		for tool in gereedschappen {
			if let Some(ev_id) = tool.evenement_id {
				per_evenement.entry(ev_id).or_default().push(tool);
			}
		}

		evenementen
			.into_iter()
			.map(|data| {
				let tools =
					per_evenement.remove(&data.0.id).unwrap_or_default();

				Self::from_joined(data, tools)
			})
			.collect()
	}

	/// Delete an [`Evenement`] given its id
	///
	/// Every tool linked to the event is freed first, within the same
	/// transaction
	#[instrument(skip(conn))]
	pub async fn delete_by_id(ev_id: i32, conn: &DbConn) -> Result<(), Error> {
		let freed = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					lock_evenement(conn, ev_id)?;

					let freed = linkage::free_all(conn, ev_id)?;

					diesel::delete(evenement::table.find(ev_id))
						.execute(conn)?;

					Ok(freed)
				})
			})
			.await??;

		info!("deleted evenement with id {ev_id}, freed {freed} gereedschap");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewEvenement {
	pub naam:            String,
	pub datum:           NaiveDateTime,
	pub plaats_id:       i32,
	pub auteur_id:       i32,
	pub gereedschap_ids: Option<Vec<i32>>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = evenement)]
#[diesel(check_for_backend(Pg))]
struct InsertableNewEvenement {
	naam:      String,
	datum:     NaiveDateTime,
	plaats_id: i32,
	auteur_id: i32,
}

impl NewEvenement {
	/// Insert this [`NewEvenement`] and link the requested tools
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Evenement, Error> {
		let insertable = InsertableNewEvenement {
			naam:      self.naam,
			datum:     self.datum,
			plaats_id: self.plaats_id,
			auteur_id: self.auteur_id,
		};
		let gereedschap_ids = self.gereedschap_ids;

		let ev_id = conn
			.interact(move |conn| {
				conn.transaction::<_, Error, _>(|conn| {
					ensure_plaats_exists(conn, insertable.plaats_id)?;
					ensure_gebruiker_exists(conn, insertable.auteur_id)?;

					let ev_id = diesel::insert_into(evenement::table)
						.values(insertable)
						.returning(evenement::id)
						.get_result::<i32>(conn)?;

					if let Some(ids) = gereedschap_ids {
						linkage::reconcile(conn, ev_id, &ids)?;
					}

					Ok(ev_id)
				})
			})
			.await??;

		let evenement = Evenement::get_by_id(ev_id, conn).await?;

		info!("created evenement {evenement:?}");

		Ok(evenement)
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EvenementUpdate {
	pub naam:            Option<String>,
	pub datum:           Option<NaiveDateTime>,
	pub plaats_id:       Option<i32>,
	pub auteur_id:       Option<i32>,
	pub gereedschap_ids: Option<Vec<i32>>,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = evenement)]
#[diesel(check_for_backend(Pg))]
struct InsertableEvenementUpdate {
	naam:       Option<String>,
	datum:      Option<NaiveDateTime>,
	plaats_id:  Option<i32>,
	auteur_id:  Option<i32>,
	updated_at: NaiveDateTime,
}

impl EvenementUpdate {
	/// Apply this update to the [`Evenement`] with the given id
	///
	/// The tool linkage is only reconciled when `gereedschap_ids` is set
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		ev_id: i32,
		conn: &DbConn,
	) -> Result<Evenement, Error> {
		let update = InsertableEvenementUpdate {
			naam:       self.naam,
			datum:      self.datum,
			plaats_id:  self.plaats_id,
			auteur_id:  self.auteur_id,
			updated_at: Utc::now().naive_utc(),
		};
		let gereedschap_ids = self.gereedschap_ids;

		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				lock_evenement(conn, ev_id)?;

				if let Some(p_id) = update.plaats_id {
					ensure_plaats_exists(conn, p_id)?;
				}

				if let Some(a_id) = update.auteur_id {
					ensure_gebruiker_exists(conn, a_id)?;
				}

				diesel::update(evenement::table.find(ev_id))
					.set(update)
					.execute(conn)?;

				if let Some(ids) = gereedschap_ids {
					linkage::reconcile(conn, ev_id, &ids)?;
				}

				Ok(())
			})
		})
		.await??;

		let evenement = Evenement::get_by_id(ev_id, conn).await?;

		info!("updated evenement {evenement:?}");

		Ok(evenement)
	}
}
