//! Defines controller functions that correspond to individual routes

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{DbPool, Error};
use diesel::{RunQueryDsl, sql_query};
use serde_json::json;

use crate::Config;

pub mod evenement;
pub mod gebruiker;
pub mod gereedschap;
pub mod plaats;
pub mod session;

/// Check if the database connection and webserver are functional
#[instrument(skip(pool))]
pub(crate) async fn ping(
	State(pool): State<DbPool>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	conn.interact(|conn| sql_query("SELECT 1").execute(conn)).await??;

	Ok((StatusCode::OK, Json(json!({ "pong": true }))))
}

/// Report which build of the server is running
pub(crate) async fn version(State(config): State<Config>) -> impl IntoResponse {
	Json(json!({
		"env": config.app_env,
		"version": env!("CARGO_PKG_VERSION"),
		"name": env!("CARGO_PKG_NAME"),
	}))
}
