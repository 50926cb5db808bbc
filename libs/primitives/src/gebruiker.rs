use chrono::NaiveDateTime;
use db::{Rol, gebruiker};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = gebruiker)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveGebruiker {
	pub id:            i32,
	pub naam:          String,
	#[serde(skip)]
	pub password_hash: String,
	pub roles:         Vec<Rol>,
	pub created_at:    NaiveDateTime,
	pub updated_at:    NaiveDateTime,
}

impl PrimitiveGebruiker {
	/// Check if this gebruiker holds the given role
	#[must_use]
	pub fn has_role(&self, rol: Rol) -> bool { self.roles.contains(&rol) }
}
