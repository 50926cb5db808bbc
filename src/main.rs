#[macro_use]
extern crate tracing;

use evenementen::routes::get_app_router;
use evenementen::{AppState, Config};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tracing::Level;

#[tokio::main]
async fn main() {
	let log_level = std::env::var("LOG_LEVEL")
		.ok()
		.and_then(|level| level.parse::<Level>().ok())
		.unwrap_or(Level::INFO);

	let config = Config::from_env();

	if config.production {
		tracing_subscriber::fmt()
			.compact()
			.with_max_level(log_level)
			.init();
	} else {
		tracing_subscriber::fmt()
			.pretty()
			.with_thread_names(true)
			.with_max_level(log_level)
			.init();
	}

	let database_pool = config.create_database_pool();
	let redis_connection = config.create_redis_connection().await;

	let state = AppState { config, database_pool, redis_connection };

	let app = get_app_router(state);

	let listener = TcpListener::bind("0.0.0.0:80").await.unwrap();

	info!("listening on {}", listener.local_addr().unwrap());

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_handler())
		.await
		.unwrap();
}

async fn shutdown_handler() {
	let ctrl_c = async {
		signal::ctrl_c().await.expect("COULD NOT INSTALL CTRL+C HANDLER");
	};

	let terminate = async {
		signal::unix::signal(SignalKind::terminate())
			.expect("COULD NOT INSTALL TERMINATE SIGNAL HANDLER")
			.recv()
			.await;
	};

	tokio::select! {
		() = ctrl_c => {},
		() = terminate => {},
	}

	info!("shutting down");
}
