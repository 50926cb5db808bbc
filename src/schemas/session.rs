use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schemas::gebruiker::GebruikerResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginRequest {
	pub naam:       String,
	pub wachtwoord: String,
}

/// A freshly opened session
///
/// `token` must be sent back as `Authorization: Bearer <token>`
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LoginResponse {
	pub token:     Uuid,
	pub gebruiker: GebruikerResponse,
}
