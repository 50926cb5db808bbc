use chrono::{NaiveDateTime, Utc};
use common::{DbConn, Error};
use db::{evenement, gereedschap};
use diesel::prelude::*;
use primitives::{PrimitiveEvenement, PrimitiveGereedschap};
use serde::{Deserialize, Serialize};

use crate::linkage::derive_beschikbaar;

pub const GEREEDSCHAP_NOT_FOUND: &str =
	"Er bestaat geen gereedschap met dit Id";

pub type JoinedGereedschapData =
	(PrimitiveGereedschap, Option<PrimitiveEvenement>);

/// A [`Gereedschap`] with the event it is linked to, if any
#[derive(Clone, Debug, Serialize)]
pub struct Gereedschap {
	pub gereedschap: PrimitiveGereedschap,
	pub evenement:   Option<PrimitiveEvenement>,
}

mod auto_type_helpers {
	pub use diesel::dsl::{LeftJoin as LeftOuterJoin, *};
}

impl Gereedschap {
	/// Build a query with all required joins to select a full tool data
	/// tuple
	#[diesel::dsl::auto_type(no_type_alias, dsl_path = "auto_type_helpers")]
	fn joined_query() -> _ {
		gereedschap::table.left_outer_join(evenement::table)
	}

	/// Construct a full [`Gereedschap`] struct from the data returned by a
	/// joined query
	fn from_joined(data: JoinedGereedschapData) -> Self {
		Self { gereedschap: data.0, evenement: data.1 }
	}

	/// Get a [`Gereedschap`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(g_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let data = conn
			.interact(move |conn| {
				query
					.filter(gereedschap::id.eq(g_id))
					.select((
						PrimitiveGereedschap::as_select(),
						evenement::all_columns.nullable(),
					))
					.get_result::<JoinedGereedschapData>(conn)
					.optional()
			})
			.await??
			.ok_or_else(|| {
				Error::NotFound(GEREEDSCHAP_NOT_FOUND.to_string())
			})?;

		Ok(Self::from_joined(data))
	}

	/// Get all [`Gereedschap`]pen
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let gereedschappen = conn
			.interact(move |conn| {
				query
					.order_by(gereedschap::id)
					.select((
						PrimitiveGereedschap::as_select(),
						evenement::all_columns.nullable(),
					))
					.get_results::<JoinedGereedschapData>(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(gereedschappen)
	}

	/// Delete a [`Gereedschap`] given its id
	///
	/// Linked tools can not be deleted, they must be unlinked first
	#[instrument(skip(conn))]
	pub async fn delete_by_id(g_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let linked_to = gereedschap::table
					.find(g_id)
					.select(gereedschap::evenement_id)
					.for_update()
					.get_result::<Option<i32>>(conn)
					.optional()?
					.ok_or_else(|| {
						Error::NotFound(GEREEDSCHAP_NOT_FOUND.to_string())
					})?;

				if let Some(ev_id) = linked_to {
					return Err(Error::Conflict(format!(
						"dit gereedschap is nog gekoppeld aan evenement {ev_id}"
					)));
				}

				diesel::delete(gereedschap::table.find(g_id)).execute(conn)?;

				Ok(())
			})
		})
		.await??;

		info!("deleted gereedschap with id {g_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewGereedschap {
	pub naam:         String,
	pub beschrijving: String,
	pub beschikbaar:  Option<bool>,
	pub evenement_id: Option<i32>,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = gereedschap)]
#[diesel(check_for_backend(Pg))]
struct InsertableNewGereedschap {
	naam:         String,
	beschrijving: String,
	beschikbaar:  bool,
	evenement_id: Option<i32>,
}

impl NewGereedschap {
	/// Insert this [`NewGereedschap`]
	///
	/// Availability is derived from the linkage, a tool created for an event
	/// is never available
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Gereedschap, Error> {
		let beschikbaar = derive_beschikbaar(
			self.evenement_id,
			false,
			self.beschikbaar,
			true,
		);

		let insertable = InsertableNewGereedschap {
			naam: self.naam,
			beschrijving: self.beschrijving,
			beschikbaar,
			evenement_id: self.evenement_id,
		};

		let g_id = conn
			.interact(|conn| {
				diesel::insert_into(gereedschap::table)
					.values(insertable)
					.returning(gereedschap::id)
					.get_result::<i32>(conn)
			})
			.await??;

		let gereedschap = Gereedschap::get_by_id(g_id, conn).await?;

		info!("created gereedschap {gereedschap:?}");

		Ok(gereedschap)
	}
}

/// A partial update of a [`Gereedschap`]
///
/// `evenement_id` distinguishes an absent key (`None`, linkage untouched) from
/// an explicit null (`Some(None)`, unlink)
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GereedschapUpdate {
	pub naam:         Option<String>,
	pub beschrijving: Option<String>,
	pub beschikbaar:  Option<bool>,
	pub evenement_id: Option<Option<i32>>,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = gereedschap)]
#[diesel(check_for_backend(Pg))]
struct InsertableGereedschapUpdate {
	naam:         Option<String>,
	beschrijving: Option<String>,
	beschikbaar:  bool,
	evenement_id: Option<Option<i32>>,
	updated_at:   NaiveDateTime,
}

impl GereedschapUpdate {
	/// Apply this update to the [`Gereedschap`] with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		g_id: i32,
		conn: &DbConn,
	) -> Result<Gereedschap, Error> {
		conn.interact(move |conn| {
			conn.transaction::<_, Error, _>(|conn| {
				let current = gereedschap::table
					.find(g_id)
					.select(PrimitiveGereedschap::as_select())
					.for_update()
					.get_result::<PrimitiveGereedschap>(conn)
					.optional()?
					.ok_or_else(|| {
						Error::NotFound(GEREEDSCHAP_NOT_FOUND.to_string())
					})?;

				let linked_to =
					self.evenement_id.unwrap_or(current.evenement_id);

				let beschikbaar = derive_beschikbaar(
					linked_to,
					self.evenement_id.is_some(),
					self.beschikbaar,
					current.beschikbaar,
				);

				let update = InsertableGereedschapUpdate {
					naam: self.naam,
					beschrijving: self.beschrijving,
					beschikbaar,
					evenement_id: self.evenement_id,
					updated_at: Utc::now().naive_utc(),
				};

				diesel::update(gereedschap::table.find(g_id))
					.set(update)
					.execute(conn)?;

				Ok(())
			})
		})
		.await??;

		let gereedschap = Gereedschap::get_by_id(g_id, conn).await?;

		info!("updated gereedschap {gereedschap:?}");

		Ok(gereedschap)
	}
}
