//! Request and response bodies of the API

use serde::{Deserialize, Serialize};

pub mod evenement;
pub mod gebruiker;
pub mod gereedschap;
pub mod plaats;
pub mod session;

/// Body of every list endpoint
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ListResponse<T> {
	pub items: Vec<T>,
}

impl<T, I: Into<T>> FromIterator<I> for ListResponse<T> {
	fn from_iter<It: IntoIterator<Item = I>>(iter: It) -> Self {
		Self { items: iter.into_iter().map(Into::into).collect() }
	}
}
