//! Library-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diesel::result::DatabaseErrorKind;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Operation conflicts with the current state of some resource
	#[error("{0}")]
	Conflict(String),
	/// Request/operation forbidden
	#[error("geen toegang tot deze resource")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// The request body could not be parsed
	#[error("{0}")]
	InvalidBody(String),
	/// One or more fields of the request failed validation
	#[error("ongeldige invoer")]
	InvalidFields(validator::ValidationErrors),
	/// Any error related to logging in
	#[error(transparent)]
	LoginError(#[from] LoginError),
	/// Resource not found
	#[error("{0}")]
	NotFound(String),
	/// Invalid or missing token
	#[error(transparent)]
	TokenError(#[from] TokenError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

/// JSON body of every error response
#[derive(Clone, Debug, Serialize)]
pub struct ErrorResponse {
	pub code:    &'static str,
	pub message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Value>,
}

impl Error {
	/// Return the identifying code of this error's kind
	///
	/// These codes are part of the API, clients match on them
	#[must_use]
	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidBody(_)
			| Self::InvalidFields(_)
			| Self::ValidationError(_) => "VALIDATION_FAILED",
			Self::LoginError(_) | Self::TokenError(_) => "UNAUTHORIZED",
			Self::Forbidden => "FORBIDDEN",
			Self::NotFound(_) => "NOT_FOUND",
			Self::Conflict(_) => "CONFLICT",
			Self::Infallible(_) | Self::InternalServerError => {
				"INTERNAL_SERVER_ERROR"
			},
		}
	}

	/// HTTP status for this error
	#[must_use]
	pub fn status(&self) -> StatusCode {
		match self {
			Self::InvalidBody(_)
			| Self::InvalidFields(_)
			| Self::ValidationError(_) => StatusCode::BAD_REQUEST,
			Self::LoginError(_) | Self::TokenError(_) => {
				StatusCode::UNAUTHORIZED
			},
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
			Self::Conflict(_) => StatusCode::CONFLICT,
			Self::Infallible(_) | Self::InternalServerError => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
		}
	}

	/// Return additional information about the error
	fn details(&self) -> Option<Value> {
		match self {
			Self::InvalidFields(errs) => {
				let fields = errs
					.field_errors()
					.into_iter()
					.map(|(field, errs)| {
						let messages = errs
							.iter()
							.map(ToString::to_string)
							.collect::<Vec<_>>();

						(field.to_string(), Value::from(messages))
					})
					.collect::<serde_json::Map<_, _>>();

				Some(Value::Object(fields))
			},
			_ => None,
		}
	}

	/// Build the JSON body for this error
	#[must_use]
	pub fn to_error_response(&self) -> ErrorResponse {
		ErrorResponse {
			code:    self.code(),
			message: self.to_string(),
			details: self.details(),
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		match self.status() {
			StatusCode::INTERNAL_SERVER_ERROR => error!("{self:?}"),
			_ => debug!("{self:?}"),
		}

		(self.status(), axum::Json(self.to_error_response())).into_response()
	}
}

/// Any error related to logging in
///
/// Both variants share one message so a caller can not probe for existing
/// names, the naam only shows up in the logs
#[derive(Debug, Error)]
pub enum LoginError {
	#[error("ongeldige naam of wachtwoord")]
	UnknownNaam(String),
	#[error("ongeldige naam of wachtwoord")]
	InvalidPassword,
}

/// Any error related to a token
#[derive(Debug, Error)]
pub enum TokenError {
	#[error("ontbrekend of ongeldig toegangstoken")]
	MissingAccessToken,
	#[error("sessie bestaat niet of is verlopen")]
	MissingSession,
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Unknown database constraint violation
	#[error("constraint error -- {0:?}")]
	ConstraintError(String),
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error hashing some value
	#[error("hash error -- {0:?}")]
	HashError(argon2::password_hash::Error),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error executing some redis operation
	#[error("redis error -- {0:?}")]
	RedisError(redis::RedisError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
	/// Attempted to extract a session from a request that has not been
	/// authorized
	#[error("attempted to extract session without checking authorization")]
	SessionWithoutAuthError,
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self { Self::InvalidFields(err) }
}

/// Map malformed JSON bodies to application errors
impl From<JsonRejection> for Error {
	fn from(err: JsonRejection) -> Self { Self::InvalidBody(err.body_text()) }
}

/// Map unparsable path parameters to application errors
impl From<PathRejection> for Error {
	fn from(err: PathRejection) -> Self { Self::InvalidBody(err.body_text()) }
}

/// Map password hashing errors to application errors
impl From<argon2::password_hash::Error> for Error {
	fn from(err: argon2::password_hash::Error) -> Self {
		match err {
			argon2::password_hash::Error::Password => {
				LoginError::InvalidPassword.into()
			},
			_ => InternalServerError::HashError(err).into(),
		}
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// What a violated database constraint means for the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstraintViolation {
	Validation(&'static str),
	Conflict(&'static str),
	NotFound(&'static str),
}

impl From<ConstraintViolation> for Error {
	fn from(value: ConstraintViolation) -> Self {
		match value {
			ConstraintViolation::Validation(m) => {
				Self::ValidationError(m.to_string())
			},
			ConstraintViolation::Conflict(m) => Self::Conflict(m.to_string()),
			ConstraintViolation::NotFound(m) => Self::NotFound(m.to_string()),
		}
	}
}

/// Map of constraint names to API errors.
///
/// Must be kept in sync with the constraint names in `migrations/`
pub static CONSTRAINT_VIOLATIONS: LazyLock<
	HashMap<&str, ConstraintViolation>,
> = LazyLock::new(|| {
	HashMap::from([
		(
			"plaats_naam_key",
			ConstraintViolation::Validation(
				"er bestaat al een plaats met deze naam",
			),
		),
		(
			"gebruiker_naam_key",
			ConstraintViolation::Validation(
				"er bestaat al een gebruiker met deze naam",
			),
		),
		(
			"evenement_plaats_id_fkey",
			ConstraintViolation::Conflict(
				"deze plaats wordt nog gebruikt door een of meer evenementen",
			),
		),
		(
			"evenement_auteur_id_fkey",
			ConstraintViolation::Conflict(
				"deze gebruiker is nog auteur van een of meer evenementen",
			),
		),
		(
			"gereedschap_evenement_id_fkey",
			ConstraintViolation::NotFound(
				"Er bestaat geen evenement met dit Id",
			),
		),
	])
});

/// Translate a violated constraint into an application error
fn from_constraint(
	constraint_name: Option<&str>,
	err: diesel::result::Error,
) -> Error {
	let violation =
		constraint_name.and_then(|c| CONSTRAINT_VIOLATIONS.get(c)).copied();

	match violation {
		Some(violation) => violation.into(),
		None => {
			let name = constraint_name.unwrap_or("<unnamed>").to_string();

			error!("unmapped constraint {name} -- {err:?}");

			InternalServerError::ConstraintError(name).into()
		},
	}
}

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("resource niet gevonden".to_string())
			},
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation
				| DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => {
				let constraint_name = info.constraint_name().map(str::to_owned);

				from_constraint(constraint_name.as_deref(), err)
			},
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<redis::RedisError> for Error {
	fn from(err: redis::RedisError) -> Self {
		InternalServerError::RedisError(err).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unique_venue_name_is_a_validation_error() {
		let err = from_constraint(
			Some("plaats_naam_key"),
			diesel::result::Error::NotFound,
		);

		assert_eq!(err.status(), StatusCode::BAD_REQUEST);
		assert_eq!(err.code(), "VALIDATION_FAILED");
	}

	#[test]
	fn referenced_venue_is_a_conflict() {
		let err = from_constraint(
			Some("evenement_plaats_id_fkey"),
			diesel::result::Error::NotFound,
		);

		assert_eq!(err.status(), StatusCode::CONFLICT);
	}

	#[test]
	fn unknown_constraint_is_internal() {
		let err = from_constraint(
			Some("something_else_key"),
			diesel::result::Error::NotFound,
		);

		assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(err.to_string(), "internal server error");
	}

	#[test]
	fn error_body_omits_empty_details() {
		let body = Error::NotFound("weg".to_string()).to_error_response();
		let json = serde_json::to_value(body).unwrap();

		assert_eq!(json["code"], "NOT_FOUND");
		assert_eq!(json["message"], "weg");
		assert!(json.get("details").is_none());
	}

	#[test]
	fn login_errors_do_not_reveal_known_names() {
		let unknown = Error::from(LoginError::UnknownNaam("jan".to_string()));
		let wrong = Error::from(LoginError::InvalidPassword);

		assert_eq!(unknown.to_string(), wrong.to_string());
		assert!(!unknown.to_string().contains("jan"));
		assert_eq!(unknown.code(), "UNAUTHORIZED");
	}
}
