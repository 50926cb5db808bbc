use chrono::NaiveDateTime;
use db::plaats;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = plaats)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitivePlaats {
	pub id:         i32,
	pub naam:       String,
	pub straat:     String,
	pub huisnummer: String,
	pub postcode:   String,
	pub gemeente:   String,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}
