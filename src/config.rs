use axum::http::HeaderValue;
use chrono::TimeDelta;
use common::{DbPool, RedisConn};
use deadpool_diesel::postgres::{Manager, Pool};

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,
	pub redis_url:    String,

	/// Name of the running environment, reported by the version endpoint
	pub app_env:    String,
	/// Log in a compact single line format instead of the pretty one
	pub production: bool,

	/// Origin allowed to call the API from a browser
	pub frontend_url: HeaderValue,

	pub access_token_lifetime: TimeDelta,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	fn get_env_default(var: &str, default: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| default.to_string())
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing or malformed
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");
		let redis_url = Self::get_env_var("REDIS_URL");

		let app_env = Self::get_env_default("APP_ENV", "development");
		let production = Self::get_env_default("PRODUCTION", "false")
			.parse::<bool>()
			.expect("PRODUCTION must be a boolean");

		let frontend_url = Self::get_env_var("FRONTEND_URL")
			.parse::<HeaderValue>()
			.expect("FRONTEND_URL must be a valid header value");

		let access_token_lifetime = TimeDelta::minutes(
			Self::get_env_var("ACCESS_TOKEN_LIFETIME_MINUTES")
				.parse::<i64>()
				.expect("ACCESS_TOKEN_LIFETIME_MINUTES must be a number"),
		);

		Self {
			database_url,
			redis_url,
			app_env,
			production,
			frontend_url,
			access_token_lifetime,
		}
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> DbPool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().expect("COULD NOT BUILD DATABASE POOL")
	}

	/// Create a redis connection for the given config
	///
	/// # Panics
	/// Panics if connecting to redis fails
	pub async fn create_redis_connection(&self) -> RedisConn {
		let client = redis::Client::open(self.redis_url.clone())
			.expect("COULD NOT CREATE REDIS CLIENT");

		client
			.get_multiplexed_async_connection()
			.await
			.expect("COULD NOT CONNECT TO REDIS")
	}
}
