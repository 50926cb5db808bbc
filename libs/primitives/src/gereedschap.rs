use chrono::NaiveDateTime;
use db::gereedschap;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = gereedschap)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveGereedschap {
	pub id:           i32,
	pub naam:         String,
	pub beschrijving: String,
	pub beschikbaar:  bool,
	pub evenement_id: Option<i32>,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}
