use chrono::NaiveDateTime;
use models::{Gereedschap, GereedschapUpdate, NewGereedschap};
use primitives::PrimitiveGereedschap;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::evenement::EvenementSummary;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GereedschapResponse {
	pub id:           i32,
	pub naam:         String,
	pub beschrijving: String,
	pub beschikbaar:  bool,
	#[serde(rename = "evenementId")]
	pub evenement_id: Option<i32>,
	pub evenement:    Option<EvenementSummary>,
	pub created_at:   NaiveDateTime,
	pub updated_at:   NaiveDateTime,
}

impl From<Gereedschap> for GereedschapResponse {
	fn from(value: Gereedschap) -> Self {
		Self {
			id:           value.gereedschap.id,
			naam:         value.gereedschap.naam,
			beschrijving: value.gereedschap.beschrijving,
			beschikbaar:  value.gereedschap.beschikbaar,
			evenement_id: value.gereedschap.evenement_id,
			evenement:    value.evenement.map(Into::into),
			created_at:   value.gereedschap.created_at,
			updated_at:   value.gereedschap.updated_at,
		}
	}
}

/// A [`Gereedschap`] as embedded in an event
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GereedschapSummary {
	pub id:          i32,
	pub naam:        String,
	pub beschikbaar: bool,
}

impl From<PrimitiveGereedschap> for GereedschapSummary {
	fn from(value: PrimitiveGereedschap) -> Self {
		Self {
			id:          value.id,
			naam:        value.naam,
			beschikbaar: value.beschikbaar,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct CreateGereedschapRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "naam is verplicht en mag maximaal 128 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:         String,
	#[validate(length(
		min = 1,
		message = "beschrijving is verplicht",
		code = "beschrijving-length"
	))]
	pub beschrijving: String,
	/// Ignored when the tool is created for an event
	pub beschikbaar:  Option<bool>,
	#[serde(rename = "evenementId")]
	pub evenement_id: Option<i32>,
}

impl CreateGereedschapRequest {
	#[must_use]
	pub fn to_insertable(self) -> NewGereedschap {
		NewGereedschap {
			naam:         self.naam,
			beschrijving: self.beschrijving,
			beschikbaar:  self.beschikbaar,
			evenement_id: self.evenement_id,
		}
	}
}

/// Partial update of a [`Gereedschap`]
///
/// An absent `evenementId` leaves the linkage alone, an explicit `null`
/// unlinks the tool
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateGereedschapRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "naam mag niet leeg zijn en maximaal 128 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:         Option<String>,
	#[validate(length(
		min = 1,
		message = "beschrijving mag niet leeg zijn",
		code = "beschrijving-length"
	))]
	pub beschrijving: Option<String>,
	pub beschikbaar:  Option<bool>,
	#[serde(
		default,
		rename = "evenementId",
		with = "::serde_with::rust::double_option",
		skip_serializing_if = "Option::is_none"
	)]
	pub evenement_id: Option<Option<i32>>,
}

impl UpdateGereedschapRequest {
	#[must_use]
	pub fn to_insertable(self) -> GereedschapUpdate {
		GereedschapUpdate {
			naam:         self.naam,
			beschrijving: self.beschrijving,
			beschikbaar:  self.beschikbaar,
			evenement_id: self.evenement_id,
		}
	}
}
