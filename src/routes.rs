use std::time::Duration;

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post, put};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::evenement::{
	create_evenement,
	delete_evenement,
	get_all_evenementen,
	get_evenement,
	update_evenement,
};
use crate::controllers::gebruiker::{
	delete_gebruiker,
	get_all_gebruikers,
	get_gebruiker,
	register_gebruiker,
	update_gebruiker,
};
use crate::controllers::gereedschap::{
	create_gereedschap,
	delete_gereedschap,
	get_all_gereedschap,
	get_gereedschap,
	get_gereedschap_evenement,
	update_gereedschap,
};
use crate::controllers::plaats::{
	create_plaats,
	delete_plaats,
	get_all_plaatsen,
	get_plaats,
	update_plaats,
};
use crate::controllers::session::{login, logout};
use crate::controllers::{ping, version};
use crate::middleware::PolicyLayer;
use crate::policy::{Operation, Resource};

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let api_routes = Router::new()
		.nest("/health", health_routes(&state))
		.nest("/sessions", session_routes(&state))
		.nest("/gebruikers", gebruiker_routes(&state))
		.nest("/plaatsen", plaats_routes(&state))
		.nest("/evenementen", evenement_routes(&state))
		.nest("/gereedschap", gereedschap_routes(&state));

	let cors = CorsLayer::new()
		.allow_origin(state.config.frontend_url.clone())
		.allow_methods([
			Method::GET,
			Method::POST,
			Method::PUT,
			Method::DELETE,
		])
		.allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

	Router::new()
		.nest("/api", api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new())
				.layer(cors),
		)
		.with_state(state)
}

/// Build a function guarding a single operation on the given resource
fn policy(
	state: &AppState,
	resource: Resource,
) -> impl Fn(Operation) -> PolicyLayer {
	let state = state.clone();

	move |operation| PolicyLayer::new(state.clone(), resource, operation)
}

/// Health routes
fn health_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Health);

	Router::new()
		.route("/ping", get(ping).layer(guard(Operation::Get)))
		.route("/version", get(version).layer(guard(Operation::Get)))
}

/// Login and logout routes
fn session_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Sessions);

	Router::new().route(
		"/",
		post(login)
			.layer(guard(Operation::Create))
			.merge(delete(logout).layer(guard(Operation::Delete))),
	)
}

/// Gebruiker routes, the `id` segment may be `me`
fn gebruiker_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Gebruikers);

	Router::new()
		.route(
			"/",
			get(get_all_gebruikers)
				.layer(guard(Operation::List))
				.merge(post(register_gebruiker).layer(guard(Operation::Create))),
		)
		.route(
			"/{id}",
			get(get_gebruiker)
				.layer(guard(Operation::Get))
				.merge(put(update_gebruiker).layer(guard(Operation::Update)))
				.merge(delete(delete_gebruiker).layer(guard(Operation::Delete))),
		)
}

/// Plaats routes
fn plaats_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Plaatsen);

	Router::new()
		.route(
			"/",
			get(get_all_plaatsen)
				.layer(guard(Operation::List))
				.merge(post(create_plaats).layer(guard(Operation::Create))),
		)
		.route(
			"/{id}",
			get(get_plaats)
				.layer(guard(Operation::Get))
				.merge(put(update_plaats).layer(guard(Operation::Update)))
				.merge(delete(delete_plaats).layer(guard(Operation::Delete))),
		)
}

/// Evenement routes
fn evenement_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Evenementen);

	Router::new()
		.route(
			"/",
			get(get_all_evenementen)
				.layer(guard(Operation::List))
				.merge(post(create_evenement).layer(guard(Operation::Create))),
		)
		.route(
			"/{id}",
			get(get_evenement)
				.layer(guard(Operation::Get))
				.merge(put(update_evenement).layer(guard(Operation::Update)))
				.merge(
					delete(delete_evenement).layer(guard(Operation::Delete)),
				),
		)
}

/// Gereedschap routes
fn gereedschap_routes(state: &AppState) -> Router<AppState> {
	let guard = policy(state, Resource::Gereedschap);

	Router::new()
		.route(
			"/",
			get(get_all_gereedschap)
				.layer(guard(Operation::List))
				.merge(post(create_gereedschap).layer(guard(Operation::Create))),
		)
		.route(
			"/{id}",
			get(get_gereedschap)
				.layer(guard(Operation::Get))
				.merge(put(update_gereedschap).layer(guard(Operation::Update)))
				.merge(
					delete(delete_gereedschap)
						.layer(guard(Operation::Delete)),
				),
		)
		.route(
			"/{id}/evenement",
			get(get_gereedschap_evenement)
				.layer(guard(Operation::LinkedEvenement)),
		)
}
