use axum::http::StatusCode;
use db::Rol;
use evenementen::schemas::ListResponse;
use evenementen::schemas::gebruiker::GebruikerResponse;
use serde_json::{Value, json};

mod common;

use common::{TEST_PASSWORD, TestEnv};

#[tokio::test(flavor = "multi_thread")]
async fn test_register_gebruiker() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/gebruikers")
		.json(&json!({ "naam": "jan", "wachtwoord": TEST_PASSWORD }))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<Value>();

	assert_eq!(body["naam"], "jan");
	assert_eq!(body["roles"], json!(["user"]));
	assert!(body.get("password_hash").is_none());
	assert!(body.get("wachtwoord").is_none());

	let env = env.login("jan").await;

	let response = env.app.get("/api/gebruikers/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<GebruikerResponse>().naam, "jan");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_gebruiker_duplicate_naam() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/gebruikers")
		.json(&json!({ "naam": "test", "wachtwoord": "geheim1234" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_register_gebruiker_short_wachtwoord() {
	let env = TestEnv::new().await;

	let response = env
		.app
		.post("/api/gebruikers")
		.json(&json!({ "naam": "jan", "wachtwoord": "kort" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert!(body["details"]["wachtwoord"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_all_gebruikers() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env.app.get("/api/gebruikers").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ListResponse<GebruikerResponse>>();

	assert_eq!(body.items.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_all_gebruikers_not_admin() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.get("/api/gebruikers").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "FORBIDDEN");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_me() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.get("/api/gebruikers/me").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<GebruikerResponse>();

	assert_eq!(body.id, env.gebruiker_id("test").await);
	assert_eq!(body.roles, vec![Rol::User]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_other_gebruiker_forbidden() {
	let env = TestEnv::new().await.login("test").await;

	let admin_id = env.gebruiker_id("admin").await;

	let response = env.app.get(&format!("/api/gebruikers/{admin_id}")).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_gets_other_gebruiker() {
	let env = TestEnv::new().await.login_admin().await;

	let test_id = env.gebruiker_id("test").await;

	let response = env.app.get(&format!("/api/gebruikers/{test_id}")).await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<GebruikerResponse>().naam, "test");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_gebruiker_not_found() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env.app.get("/api/gebruikers/999").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_own_naam() {
	let env = TestEnv::new().await.login("test").await;

	let response = env
		.app
		.put("/api/gebruikers/me")
		.json(&json!({ "naam": "tester" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<GebruikerResponse>().naam, "tester");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_own_wachtwoord() {
	let env = TestEnv::new().await.login("test").await;

	let response = env
		.app
		.put("/api/gebruikers/me")
		.json(&json!({ "wachtwoord": "nieuwgeheim1234" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env
		.app
		.post("/api/sessions")
		.json(&json!({ "naam": "test", "wachtwoord": "nieuwgeheim1234" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::CREATED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_own_roles_forbidden() {
	let env = TestEnv::new().await.login("test").await;

	let response = env
		.app
		.put("/api/gebruikers/me")
		.json(&json!({ "roles": ["user", "admin"] }))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

	let response = env.app.get("/api/gebruikers/me").await;

	assert_eq!(response.json::<GebruikerResponse>().roles, vec![Rol::User]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_updates_roles_as_string() {
	let env = TestEnv::new().await.login_admin().await;

	let test_id = env.gebruiker_id("test").await;

	let response = env
		.app
		.put(&format!("/api/gebruikers/{test_id}"))
		.json(&json!({ "roles": "admin" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<GebruikerResponse>().roles,
		vec![Rol::User, Rol::Admin]
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_updates_roles_as_list() {
	let env = TestEnv::new().await.login_admin().await;

	let test_id = env.gebruiker_id("test").await;

	let response = env
		.app
		.put(&format!("/api/gebruikers/{test_id}"))
		.json(&json!({ "roles": ["admin", "admin"] }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<GebruikerResponse>().roles,
		vec![Rol::User, Rol::Admin]
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_admin_revokes_admin_role() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env
		.app
		.put("/api/gebruikers/me")
		.json(&json!({ "roles": [] }))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(response.json::<GebruikerResponse>().roles, vec![Rol::User]);

	let response = env.app.get("/api/gebruikers").await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_unknown_role() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env
		.app
		.put("/api/gebruikers/me")
		.json(&json!({ "roles": "user,superuser" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_self() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.delete("/api/gebruikers/me").await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response = env.app.get("/api/gebruikers/me").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_other_gebruiker_forbidden() {
	let env = TestEnv::new().await.login("test").await;

	let admin_id = env.gebruiker_id("admin").await;

	let response = env.app.delete(&format!("/api/gebruikers/{admin_id}")).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_auteur_conflict() {
	let env = TestEnv::new().await.login_admin().await;

	let plaats = env.create_plaats("Vooruit").await;
	env.create_evenement("Fuif", plaats.plaats.id, vec![]).await;

	let response = env.app.delete("/api/gebruikers/me").await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);
}
