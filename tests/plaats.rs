use axum::http::StatusCode;
use evenementen::schemas::ListResponse;
use evenementen::schemas::plaats::{PlaatsRequest, PlaatsResponse};
use serde_json::{Value, json};

mod common;

use common::TestEnv;

fn vooruit() -> PlaatsRequest {
	PlaatsRequest {
		naam:       "X".to_string(),
		straat:     "Y".to_string(),
		huisnummer: "1".to_string(),
		postcode:   "9000".to_string(),
		gemeente:   "Gent".to_string(),
	}
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env.app.post("/api/plaatsen").json(&vooruit()).await;

	assert_eq!(response.status_code(), StatusCode::CREATED);

	let body = response.json::<PlaatsResponse>();

	assert!(body.id > 0);
	assert_eq!(body.naam, "X");
	assert_eq!(body.straat, "Y");
	assert_eq!(body.huisnummer, "1");
	assert_eq!(body.postcode, "9000");
	assert_eq!(body.gemeente, "Gent");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_then_get_plaats() {
	let env = TestEnv::new().await.login_admin().await;

	let created = env
		.app
		.post("/api/plaatsen")
		.json(&vooruit())
		.await
		.json::<PlaatsResponse>();

	let response = env.app.get(&format!("/api/plaatsen/{}", created.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<PlaatsResponse>();

	assert_eq!(body.naam, created.naam);
	assert_eq!(body.straat, created.straat);
	assert_eq!(body.huisnummer, created.huisnummer);
	assert_eq!(body.postcode, created.postcode);
	assert_eq!(body.gemeente, created.gemeente);
	assert_eq!(body.evenementen.map(|e| e.len()), Some(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats_missing_fields() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env
		.app
		.post("/api/plaatsen")
		.json(&json!({ "naam": "X", "straat": "Y" }))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats_empty_field() {
	let env = TestEnv::new().await.login_admin().await;

	let mut request = vooruit();
	request.gemeente = String::new();

	let response = env.app.post("/api/plaatsen").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "VALIDATION_FAILED");
	assert!(body["details"]["gemeente"].is_array());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats_invalid_postcode() {
	let env = TestEnv::new().await.login_admin().await;

	let mut request = vooruit();
	request.postcode = "90000".to_string();

	let response = env.app.post("/api/plaatsen").json(&request).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats_duplicate_naam() {
	let env = TestEnv::new().await.login_admin().await;

	env.create_plaats("X").await;

	let response = env.app.post("/api/plaatsen").json(&vooruit()).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_plaats_not_admin() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.post("/api/plaatsen").json(&vooruit()).await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_all_plaatsen_counts_evenementen() {
	let env = TestEnv::new().await.login("test").await;

	let vooruit = env.create_plaats("Vooruit").await;
	let icc = env.create_plaats("ICC").await;

	env.create_evenement("Fuif", vooruit.plaats.id, vec![]).await;
	env.create_evenement("Cantus", vooruit.plaats.id, vec![]).await;

	let response = env.app.get("/api/plaatsen").await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ListResponse<PlaatsResponse>>();

	assert_eq!(body.items.len(), 2);

	let count = |id: i32| {
		body.items
			.iter()
			.find(|p| p.id == id)
			.and_then(|p| p.aantal_evenementen)
	};

	assert_eq!(count(vooruit.plaats.id), Some(2));
	assert_eq!(count(icc.plaats.id), Some(0));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_plaats_not_found() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.get("/api/plaatsen/999").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "NOT_FOUND");
	assert_eq!(body["message"], "Er bestaat geen plaats met dit Id");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_plaats_non_numeric_id() {
	let env = TestEnv::new().await.login("test").await;

	let response = env.app.get("/api/plaatsen/abc").await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "VALIDATION_FAILED");
	assert!(body["message"].is_string());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_plaatsen_without_token() {
	let env = TestEnv::new().await;

	let response = env.app.get("/api/plaatsen").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_plaats() {
	let env = TestEnv::new().await.login_admin().await;

	let plaats = env.create_plaats("Vooruit").await;

	let mut request = vooruit();
	request.naam = "Kunstencentrum Vooruit".to_string();

	let response = env
		.app
		.put(&format!("/api/plaatsen/{}", plaats.plaats.id))
		.json(&request)
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<PlaatsResponse>();

	assert_eq!(body.naam, "Kunstencentrum Vooruit");
	assert_eq!(body.straat, "Y");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_plaats_duplicate_naam() {
	let env = TestEnv::new().await.login_admin().await;

	env.create_plaats("X").await;
	let other = env.create_plaats("Vooruit").await;

	let response = env
		.app
		.put(&format!("/api/plaatsen/{}", other.plaats.id))
		.json(&vooruit())
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_plaats_not_found() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env.app.put("/api/plaatsen/999").json(&vooruit()).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_unreferenced_plaats() {
	let env = TestEnv::new().await.login_admin().await;

	let plaats = env.create_plaats("Vooruit").await;

	let response =
		env.app.delete(&format!("/api/plaatsen/{}", plaats.plaats.id)).await;

	assert_eq!(response.status_code(), StatusCode::NO_CONTENT);

	let response =
		env.app.get(&format!("/api/plaatsen/{}", plaats.plaats.id)).await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_referenced_plaats() {
	let env = TestEnv::new().await.login_admin().await;

	let plaats = env.create_plaats("Vooruit").await;
	env.create_evenement("Fuif", plaats.plaats.id, vec![]).await;

	let response =
		env.app.delete(&format!("/api/plaatsen/{}", plaats.plaats.id)).await;

	assert_eq!(response.status_code(), StatusCode::CONFLICT);

	let body = response.json::<Value>();

	assert_eq!(body["code"], "CONFLICT");

	let response =
		env.app.get(&format!("/api/plaatsen/{}", plaats.plaats.id)).await;

	assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_plaats_not_found() {
	let env = TestEnv::new().await.login_admin().await;

	let response = env.app.delete("/api/plaatsen/999").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
