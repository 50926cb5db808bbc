use chrono::NaiveDateTime;
use db::evenement;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = evenement)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveEvenement {
	pub id:         i32,
	pub naam:       String,
	pub datum:      NaiveDateTime,
	pub plaats_id:  i32,
	pub auteur_id:  i32,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}
