use axum::http::{HeaderValue, header};
use axum_test::TestServer;
use chrono::NaiveDateTime;
use common::{DbPool, Error};
use db::Rol;
use evenementen::schemas::session::LoginResponse;
use evenementen::{AppState, Config, routes};
use mock_redis::{RedisUrlGuard, RedisUrlProvider};
use models::{
	Evenement,
	Gereedschap,
	NewEvenement,
	NewGebruiker,
	NewGereedschap,
	NewPlaats,
	Plaats,
};
use serde_json::json;

mod mock_db;
mod mock_redis;

use mock_db::{DATABASE_PROVIDER, DatabaseGuard};

pub const TEST_PASSWORD: &str = "bobdebouwer1234!";

#[allow(dead_code)]
pub struct TestEnv {
	pub app:         TestServer,
	pub pool:        DbPool,
	pub db_guard:    DatabaseGuard,
	pub redis_guard: RedisUrlGuard,
}

#[allow(dead_code)]
impl TestEnv {
	/// Get a test environment with mocked resources for running tests
	///
	/// The database holds two gebruikers, `admin` with both roles and `test`
	/// with only the `user` role, both using [`TEST_PASSWORD`]
	///
	/// # Panics
	/// Panics if building a test server or seeding fails
	pub async fn new() -> Self { Self::build(None).await }

	/// Get a test environment whose database pool holds at most `max_size`
	/// connections
	pub async fn with_pool_size(max_size: usize) -> Self {
		Self::build(Some(max_size)).await
	}

	async fn build(max_size: Option<usize>) -> Self {
		let config = Config::from_env();

		let test_pool_guard = (*DATABASE_PROVIDER).acquire().await;
		let test_pool = test_pool_guard.create_pool(max_size).await;

		{
			let conn = test_pool.get().await.unwrap();

			for (naam, roles) in
				[("admin", vec![Rol::User, Rol::Admin]), ("test", vec![])]
			{
				NewGebruiker {
					naam: naam.to_string(),
					wachtwoord: TEST_PASSWORD.to_string(),
					roles,
				}
				.insert(&conn)
				.await
				.unwrap();
			}
		}

		let redis_url_guard = RedisUrlProvider::acquire();
		let redis_connection = redis_url_guard.connect().await;

		let state = AppState {
			config,
			database_pool: test_pool.clone(),
			redis_connection,
		};
		let app = routes::get_app_router(state);

		let test_server = TestServer::new(app).unwrap();

		TestEnv {
			app:         test_server,
			pool:        test_pool,
			db_guard:    test_pool_guard,
			redis_guard: redis_url_guard,
		}
	}

	/// Open a session for the given gebruiker and send its token with every
	/// following request
	///
	/// # Panics
	/// Panics if logging in fails
	pub async fn login(mut self, naam: &str) -> Self {
		let response = self
			.app
			.post("/api/sessions")
			.json(&json!({ "naam": naam, "wachtwoord": TEST_PASSWORD }))
			.await;

		response.assert_status_success();

		let token = response.json::<LoginResponse>().token;

		self.app.add_header(
			header::AUTHORIZATION,
			HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
		);

		self
	}

	pub async fn login_admin(self) -> Self { self.login("admin").await }

	/// Stop sending a session token
	pub fn logout(mut self) -> Self {
		self.app.clear_headers();

		self
	}

	/// Id of a seeded gebruiker
	///
	/// # Panics
	/// Panics if no gebruiker has this naam
	pub async fn gebruiker_id(&self, naam: &str) -> i32 {
		let conn = self.pool.get().await.unwrap();

		models::Gebruiker::get_by_naam(naam.to_string(), &conn)
			.await
			.unwrap()
			.gebruiker
			.id
	}

	/// Insert a plaats directly, bypassing the API
	pub async fn create_plaats(&self, naam: &str) -> Plaats {
		let conn = self.pool.get().await.unwrap();

		NewPlaats {
			naam:       naam.to_string(),
			straat:     "Sint-Pietersnieuwstraat".to_string(),
			huisnummer: "23".to_string(),
			postcode:   "9000".to_string(),
			gemeente:   "Gent".to_string(),
		}
		.insert(&conn)
		.await
		.unwrap()
	}

	/// Insert an unlinked, available tool directly, bypassing the API
	pub async fn create_gereedschap(&self, naam: &str) -> Gereedschap {
		let conn = self.pool.get().await.unwrap();

		NewGereedschap {
			naam:         naam.to_string(),
			beschrijving: format!("{naam} voor het evenement"),
			beschikbaar:  None,
			evenement_id: None,
		}
		.insert(&conn)
		.await
		.unwrap()
	}

	/// Insert an evenement authored by `admin` directly, bypassing the API
	pub async fn create_evenement(
		&self,
		naam: &str,
		plaats_id: i32,
		gereedschap_ids: Vec<i32>,
	) -> Evenement {
		let auteur_id = self.gebruiker_id("admin").await;
		let conn = self.pool.get().await.unwrap();

		NewEvenement {
			naam: naam.to_string(),
			datum: datum("2025-06-21T20:00:00"),
			plaats_id,
			auteur_id,
			gereedschap_ids: Some(gereedschap_ids),
		}
		.insert(&conn)
		.await
		.unwrap()
	}

	/// Fetch a tool straight from the database
	pub async fn get_gereedschap(&self, id: i32) -> Result<Gereedschap, Error> {
		let conn = self.pool.get().await.unwrap();

		Gereedschap::get_by_id(id, &conn).await
	}
}

/// Parse a `datum` in the format used by the API
#[allow(dead_code)]
pub fn datum(value: &str) -> NaiveDateTime {
	value.parse::<NaiveDateTime>().unwrap()
}
