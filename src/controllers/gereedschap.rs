use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use common::{DbPool, Error};
use models::{EVENEMENT_NOT_FOUND, Evenement, Gereedschap};
use validator::Validate;

use crate::schemas::ListResponse;
use crate::schemas::evenement::EvenementResponse;
use crate::schemas::gereedschap::{
	CreateGereedschapRequest,
	GereedschapResponse,
	UpdateGereedschapRequest,
};

#[instrument(skip(pool))]
pub async fn get_all_gereedschap(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let gereedschappen = Gereedschap::get_all(&conn).await?;
	let response: ListResponse<GereedschapResponse> =
		gereedschappen.into_iter().collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_gereedschap(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let gereedschap = Gereedschap::get_by_id(id, &conn).await?;
	let response: GereedschapResponse = gereedschap.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Get the full [`Evenement`] a tool is linked to
#[instrument(skip(pool))]
pub async fn get_gereedschap_evenement(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let gereedschap = Gereedschap::get_by_id(id, &conn).await?;

	let Some(ev_id) = gereedschap.gereedschap.evenement_id else {
		return Err(Error::NotFound(EVENEMENT_NOT_FOUND.to_string()));
	};

	let evenement = Evenement::get_by_id(ev_id, &conn).await?;
	let response: EvenementResponse = evenement.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_gereedschap(
	State(pool): State<DbPool>,
	WithRejection(Json(request), _): WithRejection<
		Json<CreateGereedschapRequest>,
		Error,
	>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let gereedschap = request.to_insertable().insert(&conn).await?;
	let response: GereedschapResponse = gereedschap.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_gereedschap(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
	WithRejection(Json(request), _): WithRejection<
		Json<UpdateGereedschapRequest>,
		Error,
	>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let gereedschap = request.to_insertable().apply_to(id, &conn).await?;
	let response: GereedschapResponse = gereedschap.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_gereedschap(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Gereedschap::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
