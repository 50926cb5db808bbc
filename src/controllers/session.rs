//! Controllers for opening and closing sessions

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_extra::extract::WithRejection;
use common::{DbPool, Error, RedisConn};
use models::Gebruiker;

use crate::schemas::session::{LoginRequest, LoginResponse};
use crate::{Config, Session};

#[instrument(skip_all)]
pub(crate) async fn login(
	State(pool): State<DbPool>,
	State(mut r_conn): State<RedisConn>,
	State(config): State<Config>,
	WithRejection(Json(login_data), _): WithRejection<Json<LoginRequest>, Error>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let gebruiker = Gebruiker::get_by_naam(login_data.naam, &conn).await?;

	gebruiker.verify_password(&login_data.wachtwoord)?;

	let session = Session::create(&config, &gebruiker, &mut r_conn).await?;

	info!("logged in gebruiker {}", gebruiker.gebruiker.id);

	let response =
		LoginResponse { token: session.id, gebruiker: gebruiker.into() };

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(r_conn))]
pub(crate) async fn logout(
	State(mut r_conn): State<RedisConn>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	Session::delete(session.id, &mut r_conn).await?;

	info!("logged out gebruiker {}", session.gebruiker_id);

	Ok(StatusCode::NO_CONTENT)
}
