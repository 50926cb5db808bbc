use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

/// A role tag granting some access scope
///
/// Ordering follows declaration order, so canonical role sets always list
/// `user` before `admin`
#[derive(
	Clone,
	Copy,
	DbEnum,
	Debug,
	Default,
	Deserialize,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
)]
#[serde(rename_all = "lowercase")]
#[ExistingTypePath = "crate::sql_types::GebruikerRol"]
pub enum Rol {
	#[default]
	User,
	Admin,
}

impl Rol {
	#[must_use]
	pub fn get_variants() -> [&'static str; 2] { ["user", "admin"] }
}

impl fmt::Display for Rol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::User => write!(f, "user"),
			Self::Admin => write!(f, "admin"),
		}
	}
}

impl FromStr for Rol {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"user" => Ok(Self::User),
			"admin" => Ok(Self::Admin),
			other => {
				Err(format!(
					"onbekende rol '{other}', verwacht een van {:?}",
					Self::get_variants()
				))
			},
		}
	}
}

/// Normalize any collection of roles to the canonical stored form
///
/// The result is sorted, free of duplicates and always contains
/// [`Rol::User`]
#[must_use]
pub fn canonical_roles(roles: impl IntoIterator<Item = Rol>) -> Vec<Rol> {
	let mut set: BTreeSet<Rol> = roles.into_iter().collect();

	set.insert(Rol::User);

	set.into_iter().collect()
}
