use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use common::{DbPool, Error};
use models::Evenement;
use validator::Validate;

use crate::Session;
use crate::schemas::ListResponse;
use crate::schemas::evenement::{
	CreateEvenementRequest,
	EvenementResponse,
	UpdateEvenementRequest,
};

#[instrument(skip(pool))]
pub async fn get_all_evenementen(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let evenementen = Evenement::get_all(&conn).await?;
	let response: ListResponse<EvenementResponse> =
		evenementen.into_iter().collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_evenement(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let evenement = Evenement::get_by_id(id, &conn).await?;
	let response: EvenementResponse = evenement.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_evenement(
	State(pool): State<DbPool>,
	session: Session,
	WithRejection(Json(request), _): WithRejection<
		Json<CreateEvenementRequest>,
		Error,
	>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let new_evenement = request.to_insertable(session.gebruiker_id);
	let evenement = new_evenement.insert(&conn).await?;
	let response: EvenementResponse = evenement.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_evenement(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
	WithRejection(Json(request), _): WithRejection<
		Json<UpdateEvenementRequest>,
		Error,
	>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let evenement = request.to_insertable().apply_to(id, &conn).await?;
	let response: EvenementResponse = evenement.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_evenement(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Evenement::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
