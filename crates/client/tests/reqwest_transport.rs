use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use fleet_client::{ApiError, ReqwestTransport, RolesService};
use fleet_models::RoleRequest;

const TOKEN: &str = "test-token";

fn role(id: &str, code: &str, name: &str, system: bool) -> Value {
    json!({
        "id": id,
        "code": code,
        "roleName": name,
        "normalizedName": name.to_uppercase(),
        "permissions": ["roles.read"],
        "permissionCount": 1,
        "isVisible": true,
        "isSystem": system,
        "createdAt": "2024-01-15T08:00:00Z"
    })
}

fn all_roles() -> Vec<Value> {
    vec![
        role("1", "ADMIN", "Admin", true),
        role("7", "FLEET_MANAGER", "Fleet manager", false),
    ]
}

fn envelope(data: Value) -> Value {
    json!({ "success": true, "message": "OK", "data": data, "errors": [] })
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {}", TOKEN))
        .unwrap_or(false)
}

async fn list_roles(headers: HeaderMap) -> Response {
    if !authorized(&headers) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    Json(Value::Array(all_roles())).into_response()
}

async fn create_role(Json(body): Json<Value>) -> Response {
    if body["code"] == "ADMIN" {
        let failure = json!({ "success": false, "message": "Duplicate code", "errors": ["code"] });
        return (StatusCode::CONFLICT, Json(failure)).into_response();
    }
    let name = body["roleName"].as_str().unwrap_or_default().to_string();
    let code = body["code"].as_str().unwrap_or_default().to_string();
    (StatusCode::CREATED, Json(envelope(role("99", &code, &name, false)))).into_response()
}

async fn get_role(Path(id): Path<String>) -> Response {
    match all_roles().into_iter().find(|r| r["id"] == id.as_str()) {
        Some(found) => Json(envelope(found)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn delete_role(Path(_id): Path<String>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn by_code(Path(code): Path<String>) -> Response {
    match all_roles().into_iter().find(|r| r["code"] == code.as_str()) {
        Some(found) => Json(envelope(found)).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn by_ids(Json(ids): Json<Vec<String>>) -> Json<Value> {
    let found: Vec<Value> = all_roles()
        .into_iter()
        .filter(|r| ids.iter().any(|id| r["id"] == id.as_str()))
        .collect();
    Json(envelope(Value::Array(found)))
}

async fn permissions() -> Json<Value> {
    Json(json!(["contracts.read", "roles.read", "roles.write"]))
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/v1/roles", get(list_roles).post(create_role))
        .route("/api/v1/roles/by-ids", post(by_ids))
        .route("/api/v1/roles/permissions", get(permissions))
        .route("/api/v1/roles/by-code/:code", get(by_code))
        .route("/api/v1/roles/:id", get(get_role).delete(delete_role));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn roles_service(api_url: &str, token: Option<&str>) -> RolesService {
    let transport = ReqwestTransport::new(api_url, reqwest::Client::new());
    let transport = match token {
        Some(token) => transport.with_token(token),
        None => transport,
    };
    RolesService::new(Arc::new(transport))
}

#[tokio::test]
async fn test_list_and_filters_over_http() {
    let api_url = spawn_backend().await;
    let service = roles_service(&api_url, Some(TOKEN));

    let roles = service.get_roles().await.unwrap();
    assert_eq!(roles.len(), 2);
    assert!(roles[0].created_at.is_some());

    let editable = service.get_editable_roles().await.unwrap();
    assert_eq!(editable.len(), 1);
    assert_eq!(editable[0].code, "FLEET_MANAGER");

    assert!(service.check_role_name_exists("admin", None).await.unwrap());
    assert!(!service.check_role_name_exists("admin", Some("1")).await.unwrap());
}

#[tokio::test]
async fn test_missing_token_maps_to_unauthorized() {
    let api_url = spawn_backend().await;
    let service = roles_service(&api_url, None);

    assert_eq!(service.get_roles().await.unwrap_err(), ApiError::Unauthorized);
    assert_eq!(
        service.check_role_name_exists("admin", None).await.unwrap_err(),
        ApiError::Unauthorized
    );
}

#[tokio::test]
async fn test_crud_round_over_http() {
    let api_url = spawn_backend().await;
    let service = roles_service(&api_url, Some(TOKEN));

    let request = RoleRequest {
        code: "MECHANIC".to_string(),
        role_name: "Mechanic".to_string(),
        permissions: BTreeSet::from(["vehicles.maintain".to_string()]),
        is_visible: true,
        description: Some("Workshop staff".to_string()),
    };
    let created = service.add_role(&request).await.unwrap();
    assert_eq!(created.into_data().unwrap().role_name, "Mechanic");

    let duplicate = RoleRequest {
        code: "ADMIN".to_string(),
        ..request
    };
    assert_eq!(service.add_role(&duplicate).await.unwrap_err(), ApiError::Conflict);

    let fetched = service.get_role("7").await.unwrap();
    assert_eq!(fetched.into_data().unwrap().code, "FLEET_MANAGER");
    assert_eq!(service.get_role("404").await.unwrap_err(), ApiError::NotFound);

    assert!(service.delete_role("7").await.unwrap().success);
}

#[tokio::test]
async fn test_lookups_over_http() {
    let api_url = spawn_backend().await;
    let service = roles_service(&api_url, Some(TOKEN));

    assert!(service.check_role_code_exists("ADMIN", None).await);
    assert!(!service.check_role_code_exists("ADMIN", Some("1")).await);
    assert!(!service.check_role_code_exists("UNKNOWN", None).await);

    let ids = vec!["7".to_string(), "12".to_string()];
    let user_roles = service.get_user_roles(&ids).await.unwrap();
    assert_eq!(user_roles.len(), 1);
    assert_eq!(user_roles[0].id, "7");

    let permissions = service.get_permissions().await.unwrap();
    assert_eq!(permissions, vec!["contracts.read", "roles.read", "roles.write"]);
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_client_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let service = roles_service(&format!("http://{}", addr), Some(TOKEN));

    assert_eq!(service.get_roles().await.unwrap_err(), ApiError::Client);
    assert!(!service.check_role_code_exists("ADMIN", None).await);
}
