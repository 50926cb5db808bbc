use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use common::{DbPool, Error};
use models::Gebruiker;
use validator::Validate;

use crate::Session;
use crate::schemas::ListResponse;
use crate::schemas::gebruiker::{
	GebruikerResponse,
	RegisterRequest,
	UpdateGebruikerRequest,
};

/// Path segment referring to the gebruiker of the current session
const ME: &str = "me";

/// Resolve a gebruiker path segment and check the session may access it
///
/// Gebruikers can only access their own record unless they are an admin
fn resolve_gebruiker_id(segment: &str, session: &Session) -> Result<i32, Error> {
	let gebruiker_id = if segment == ME {
		session.gebruiker_id
	} else {
		segment.parse::<i32>().map_err(|_| {
			Error::ValidationError(format!("ongeldig gebruiker id '{segment}'"))
		})?
	};

	if gebruiker_id != session.gebruiker_id && !session.is_admin() {
		debug!(
			"gebruiker {} attempted to access gebruiker {gebruiker_id}",
			session.gebruiker_id
		);

		return Err(Error::Forbidden);
	}

	Ok(gebruiker_id)
}

#[instrument(skip(pool))]
pub async fn get_all_gebruikers(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let gebruikers = Gebruiker::get_all(&conn).await?;
	let response: ListResponse<GebruikerResponse> =
		gebruikers.into_iter().collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_gebruiker(
	State(pool): State<DbPool>,
	session: Session,
	WithRejection(Path(segment), _): WithRejection<Path<String>, Error>,
) -> Result<impl IntoResponse, Error> {
	let gebruiker_id = resolve_gebruiker_id(&segment, &session)?;

	let conn = pool.get().await?;

	let gebruiker = Gebruiker::get(gebruiker_id, &conn).await?;
	let response: GebruikerResponse = gebruiker.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip_all)]
pub async fn register_gebruiker(
	State(pool): State<DbPool>,
	WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, Error>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let gebruiker = request.to_insertable().insert(&conn).await?;
	let response: GebruikerResponse = gebruiker.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip_all)]
pub async fn update_gebruiker(
	State(pool): State<DbPool>,
	session: Session,
	WithRejection(Path(segment), _): WithRejection<Path<String>, Error>,
	WithRejection(Json(request), _): WithRejection<
		Json<UpdateGebruikerRequest>,
		Error,
	>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let gebruiker_id = resolve_gebruiker_id(&segment, &session)?;

	if request.roles.is_some() && !session.is_admin() {
		debug!(
			"gebruiker {} attempted to change roles without being admin",
			session.gebruiker_id
		);

		return Err(Error::Forbidden);
	}

	let conn = pool.get().await?;

	let gebruiker = request.to_insertable().apply_to(gebruiker_id, &conn).await?;
	let response: GebruikerResponse = gebruiker.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_gebruiker(
	State(pool): State<DbPool>,
	session: Session,
	WithRejection(Path(segment), _): WithRejection<Path<String>, Error>,
) -> Result<impl IntoResponse, Error> {
	let gebruiker_id = resolve_gebruiker_id(&segment, &session)?;

	let conn = pool.get().await?;

	Gebruiker::delete_by_id(gebruiker_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
