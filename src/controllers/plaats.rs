use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use common::{DbPool, Error};
use models::Plaats;
use validator::Validate;

use crate::schemas::ListResponse;
use crate::schemas::plaats::{PlaatsRequest, PlaatsResponse};

#[instrument(skip(pool))]
pub async fn get_all_plaatsen(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let plaatsen = Plaats::get_all(&conn).await?;
	let response: ListResponse<PlaatsResponse> =
		plaatsen.into_iter().collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_plaats(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let plaats = Plaats::get_by_id(id, &conn).await?;
	let response: PlaatsResponse = plaats.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_plaats(
	State(pool): State<DbPool>,
	WithRejection(Json(request), _): WithRejection<Json<PlaatsRequest>, Error>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let plaats = request.to_insertable().insert(&conn).await?;
	let response: PlaatsResponse = plaats.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_plaats(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
	WithRejection(Json(request), _): WithRejection<Json<PlaatsRequest>, Error>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let plaats = request.to_update().apply_to(id, &conn).await?;
	let response: PlaatsResponse = plaats.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_plaats(
	State(pool): State<DbPool>,
	WithRejection(Path(id), _): WithRejection<Path<i32>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Plaats::delete_by_id(id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
