use std::sync::LazyLock;

use chrono::NaiveDateTime;
use db::Rol;
use models::{Gebruiker, GebruikerUpdate, NewGebruiker};
use primitives::PrimitiveGebruiker;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::{DisplayFromStr, PickFirst, StringWithSeparator, serde_as};
use validator_derive::Validate;

static NAAM_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9-_.]*$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GebruikerResponse {
	pub id:         i32,
	pub naam:       String,
	pub roles:      Vec<Rol>,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl From<PrimitiveGebruiker> for GebruikerResponse {
	fn from(value: PrimitiveGebruiker) -> Self {
		Self {
			id:         value.id,
			naam:       value.naam,
			roles:      value.roles,
			created_at: value.created_at,
			updated_at: value.updated_at,
		}
	}
}

impl From<Gebruiker> for GebruikerResponse {
	fn from(value: Gebruiker) -> Self { value.gebruiker.into() }
}

/// A [`Gebruiker`] as embedded in other resources
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GebruikerSummary {
	pub id:   i32,
	pub naam: String,
}

impl From<PrimitiveGebruiker> for GebruikerSummary {
	fn from(value: PrimitiveGebruiker) -> Self {
		Self { id: value.id, naam: value.naam }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct RegisterRequest {
	#[validate(regex(
		path = *NAAM_REGEX,
		message = "naam moet met een letter beginnen en mag enkel letters, cijfers, punten, streepjes of underscores bevatten",
		code = "naam-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "naam moet tussen 2 en 32 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:       String,
	#[validate(length(
		min = 8,
		message = "wachtwoord moet minstens 8 tekens lang zijn",
		code = "wachtwoord-length"
	))]
	pub wachtwoord: String,
}

impl RegisterRequest {
	/// Every new gebruiker starts out with only the `user` role
	#[must_use]
	pub fn to_insertable(self) -> NewGebruiker {
		NewGebruiker {
			naam:       self.naam,
			wachtwoord: self.wachtwoord,
			roles:      vec![Rol::User],
		}
	}
}

/// Partial update of a [`Gebruiker`]
///
/// `roles` is accepted both as a list (`["user", "admin"]`) and as a comma
/// separated string (`"user,admin"`)
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateGebruikerRequest {
	#[validate(regex(
		path = *NAAM_REGEX,
		message = "naam moet met een letter beginnen en mag enkel letters, cijfers, punten, streepjes of underscores bevatten",
		code = "naam-regex"
	))]
	#[validate(length(
		min = 2,
		max = 32,
		message = "naam moet tussen 2 en 32 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:       Option<String>,
	#[validate(length(
		min = 8,
		message = "wachtwoord moet minstens 8 tekens lang zijn",
		code = "wachtwoord-length"
	))]
	pub wachtwoord: Option<String>,
	#[serde_as(
		as = "Option<PickFirst<(Vec<DisplayFromStr>, StringWithSeparator<CommaSeparator, Rol>)>>"
	)]
	pub roles:      Option<Vec<Rol>>,
}

impl UpdateGebruikerRequest {
	#[must_use]
	pub fn to_insertable(self) -> GebruikerUpdate {
		GebruikerUpdate {
			naam:       self.naam,
			wachtwoord: self.wachtwoord,
			roles:      self.roles,
		}
	}
}
