use std::sync::LazyLock;

use chrono::NaiveDateTime;
use models::{NewPlaats, Plaats, PlaatsOverview, PlaatsUpdate};
use primitives::PrimitivePlaats;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::evenement::EvenementSummary;

static POSTCODE_REGEX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlaatsResponse {
	pub id:                 i32,
	pub naam:               String,
	pub straat:             String,
	pub huisnummer:         String,
	pub postcode:           String,
	pub gemeente:           String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub aantal_evenementen: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub evenementen:        Option<Vec<EvenementSummary>>,
	pub created_at:         NaiveDateTime,
	pub updated_at:         NaiveDateTime,
}

impl From<PrimitivePlaats> for PlaatsResponse {
	fn from(value: PrimitivePlaats) -> Self {
		Self {
			id:                 value.id,
			naam:               value.naam,
			straat:             value.straat,
			huisnummer:         value.huisnummer,
			postcode:           value.postcode,
			gemeente:           value.gemeente,
			aantal_evenementen: None,
			evenementen:        None,
			created_at:         value.created_at,
			updated_at:         value.updated_at,
		}
	}
}

impl From<Plaats> for PlaatsResponse {
	fn from(value: Plaats) -> Self {
		let evenementen = value
			.evenementen
			.into_iter()
			.map(Into::into)
			.collect::<Vec<_>>();

		Self {
			aantal_evenementen: i64::try_from(evenementen.len()).ok(),
			evenementen: Some(evenementen),
			..Self::from(value.plaats)
		}
	}
}

impl From<PlaatsOverview> for PlaatsResponse {
	fn from(value: PlaatsOverview) -> Self {
		Self {
			aantal_evenementen: Some(value.aantal_evenementen),
			..Self::from(value.plaats)
		}
	}
}

/// A [`Plaats`] as embedded in other resources
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlaatsSummary {
	pub id:       i32,
	pub naam:     String,
	pub gemeente: String,
}

impl From<PrimitivePlaats> for PlaatsSummary {
	fn from(value: PrimitivePlaats) -> Self {
		Self { id: value.id, naam: value.naam, gemeente: value.gemeente }
	}
}

/// Body of both creating and replacing a [`Plaats`]
#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct PlaatsRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "naam is verplicht en mag maximaal 128 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:       String,
	#[validate(length(
		min = 1,
		max = 128,
		message = "straat is verplicht en mag maximaal 128 tekens lang zijn",
		code = "straat-length"
	))]
	pub straat:     String,
	#[validate(length(
		min = 1,
		max = 16,
		message = "huisnummer is verplicht en mag maximaal 16 tekens lang zijn",
		code = "huisnummer-length"
	))]
	pub huisnummer: String,
	#[validate(regex(
		path = *POSTCODE_REGEX,
		message = "postcode moet uit vier cijfers bestaan",
		code = "postcode-regex"
	))]
	pub postcode:   String,
	#[validate(length(
		min = 1,
		max = 128,
		message = "gemeente is verplicht en mag maximaal 128 tekens lang zijn",
		code = "gemeente-length"
	))]
	pub gemeente:   String,
}

impl PlaatsRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewPlaats {
		NewPlaats {
			naam:       self.naam,
			straat:     self.straat,
			huisnummer: self.huisnummer,
			postcode:   self.postcode,
			gemeente:   self.gemeente,
		}
	}

	#[must_use]
	pub fn to_update(self) -> PlaatsUpdate {
		PlaatsUpdate {
			naam:       self.naam,
			straat:     self.straat,
			huisnummer: self.huisnummer,
			postcode:   self.postcode,
			gemeente:   self.gemeente,
		}
	}
}
