use chrono::NaiveDateTime;
use models::{Evenement, EvenementUpdate, NewEvenement};
use primitives::PrimitiveEvenement;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::gebruiker::GebruikerSummary;
use crate::schemas::gereedschap::GereedschapSummary;
use crate::schemas::plaats::PlaatsSummary;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EvenementResponse {
	pub id:             i32,
	pub naam:           String,
	pub datum:          NaiveDateTime,
	pub plaats:         PlaatsSummary,
	pub auteur:         GebruikerSummary,
	pub gereedschappen: Vec<GereedschapSummary>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl From<Evenement> for EvenementResponse {
	fn from(value: Evenement) -> Self {
		Self {
			id:             value.evenement.id,
			naam:           value.evenement.naam,
			datum:          value.evenement.datum,
			plaats:         value.plaats.into(),
			auteur:         value.auteur.into(),
			gereedschappen: value
				.gereedschappen
				.into_iter()
				.map(Into::into)
				.collect(),
			created_at:     value.evenement.created_at,
			updated_at:     value.evenement.updated_at,
		}
	}
}

/// An [`Evenement`] as embedded in other resources
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EvenementSummary {
	pub id:        i32,
	pub naam:      String,
	pub datum:     NaiveDateTime,
	pub plaats_id: i32,
	pub auteur_id: i32,
}

impl From<PrimitiveEvenement> for EvenementSummary {
	fn from(value: PrimitiveEvenement) -> Self {
		Self {
			id:        value.id,
			naam:      value.naam,
			datum:     value.datum,
			plaats_id: value.plaats_id,
			auteur_id: value.auteur_id,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
pub struct CreateEvenementRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "naam is verplicht en mag maximaal 128 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:            String,
	pub datum:           NaiveDateTime,
	pub plaats_id:       i32,
	/// Defaults to the authenticated gebruiker
	pub auteur_id:       Option<i32>,
	pub gereedschap_ids: Option<Vec<i32>>,
}

impl CreateEvenementRequest {
	#[must_use]
	pub fn to_insertable(self, default_auteur_id: i32) -> NewEvenement {
		NewEvenement {
			naam:            self.naam,
			datum:           self.datum,
			plaats_id:       self.plaats_id,
			auteur_id:       self.auteur_id.unwrap_or(default_auteur_id),
			gereedschap_ids: self.gereedschap_ids,
		}
	}
}

/// Partial update of an [`Evenement`]
///
/// Leaving out `gereedschap_ids` keeps the current tools linked, an empty list
/// frees all of them
#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
pub struct UpdateEvenementRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "naam mag niet leeg zijn en maximaal 128 tekens lang zijn",
		code = "naam-length"
	))]
	pub naam:            Option<String>,
	pub datum:           Option<NaiveDateTime>,
	pub plaats_id:       Option<i32>,
	pub auteur_id:       Option<i32>,
	pub gereedschap_ids: Option<Vec<i32>>,
}

impl UpdateEvenementRequest {
	#[must_use]
	pub fn to_insertable(self) -> EvenementUpdate {
		EvenementUpdate {
			naam:            self.naam,
			datum:           self.datum,
			plaats_id:       self.plaats_id,
			auteur_id:       self.auteur_id,
			gereedschap_ids: self.gereedschap_ids,
		}
	}
}
