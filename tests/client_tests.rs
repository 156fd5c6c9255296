use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use motoscan::config::EnvironmentConfig;
use motoscan::models::auth::{LoginRequest, RegisterRequest};
use motoscan::models::{MotorcycleDraft, MotorcycleStatus, MotorcycleUpdate};
use motoscan::storage::{MemoryStore, SessionStore};
use motoscan::{AppError, MotoScanClient};

/// Backend simulado en memoria
#[derive(Default)]
struct Backend {
    motos: Vec<Value>,
    authorization: Vec<Option<String>>,
    register_calls: usize,
    fail_list: bool,
}

type Shared = Arc<Mutex<Backend>>;

fn record_auth(backend: &Shared, headers: &HeaderMap) {
    let value = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.lock().unwrap().authorization.push(value);
}

async fn list_motos(State(backend): State<Shared>, headers: HeaderMap) -> Response {
    record_auth(&backend, &headers);
    let guard = backend.lock().unwrap();
    if guard.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(Value::Array(guard.motos.clone())).into_response()
}

async fn create_moto(
    State(backend): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record_auth(&backend, &headers);
    let mut guard = backend.lock().unwrap();
    if guard.motos.iter().any(|m| m["placa"] == body["placa"]) {
        return StatusCode::CONFLICT.into_response();
    }
    let mut created = body.clone();
    created["createdAt"] = json!("2025-05-01T10:00:00");
    guard.motos.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_moto(
    State(backend): State<Shared>,
    Path(placa): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut guard = backend.lock().unwrap();
    let Some(moto) = guard.motos.iter_mut().find(|m| m["placa"] == placa.as_str()) else {
        return (StatusCode::NOT_FOUND, "moto não encontrada").into_response();
    };
    if let (Some(target), Some(fields)) = (moto.as_object_mut(), body.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(moto.clone()).into_response()
}

async fn delete_moto(State(backend): State<Shared>, Path(placa): Path<String>) -> StatusCode {
    let mut guard = backend.lock().unwrap();
    let before = guard.motos.len();
    guard.motos.retain(|m| m["placa"] != placa.as_str());
    if guard.motos.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["email"] == "ana@motoscan.com" && body["senha"] == "segredo" {
        "token-123".into_response()
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

async fn register(State(backend): State<Shared>, Json(_body): Json<Value>) -> StatusCode {
    backend.lock().unwrap().register_calls += 1;
    StatusCode::CREATED
}

async fn spawn_backend() -> (String, Shared) {
    let shared: Shared = Arc::new(Mutex::new(Backend::default()));
    let app = Router::new()
        .route("/motos", get(list_motos).post(create_moto))
        .route("/motos/:placa", put(update_moto).delete(delete_moto))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .with_state(shared.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), shared)
}

fn create_client(base_url: &str) -> MotoScanClient {
    let config = EnvironmentConfig {
        api_base_url: base_url.to_string(),
        auth_base_url: format!("{}/auth", base_url),
        http_timeout_secs: 5,
        ..EnvironmentConfig::default()
    };
    let session = SessionStore::new(Arc::new(MemoryStore::new()));
    MotoScanClient::new(&config, session).unwrap()
}

fn seed(backend: &Shared, placa: &str, falha_mecanica: bool, roubada: bool) {
    backend.lock().unwrap().motos.push(json!({
        "placa": placa,
        "modelo": "POP",
        "zona": "A",
        "falhaMecanica": falha_mecanica,
        "roubada": roubada,
        "multa": roubada
    }));
}

#[tokio::test]
async fn test_bearer_header_only_with_token() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);
    seed(&backend, "ABC1234", false, false);

    let motos = client.list_motorcycles().await.unwrap();
    assert_eq!(motos.len(), 1);

    client.session().set_token("abc").await.unwrap();
    client.list_motorcycles().await.unwrap();

    let auth = backend.lock().unwrap().authorization.clone();
    assert_eq!(auth, vec![None, Some("Bearer abc".to_string())]);
}

#[tokio::test]
async fn test_list_classifies_backend_records() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);
    seed(&backend, "ABC1234", false, false);
    seed(&backend, "ABC1D23", true, false);
    seed(&backend, "XYZ9876", true, true);

    let statuses: Vec<MotorcycleStatus> = client
        .list_motorcycles()
        .await
        .unwrap()
        .iter()
        .map(|m| m.status())
        .collect();
    assert_eq!(
        statuses,
        vec![
            MotorcycleStatus::Ready,
            MotorcycleStatus::MechanicalIssue,
            MotorcycleStatus::Flagged
        ]
    );
}

#[tokio::test]
async fn test_list_server_error_is_external_api() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);
    backend.lock().unwrap().fail_list = true;

    match client.list_motorcycles().await {
        Err(AppError::ExternalApi { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_create_then_duplicate_conflicts() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);

    let draft = MotorcycleDraft::new("abc1d23", "MOTO E", "A", MotorcycleStatus::Flagged).unwrap();
    let created = client.create_motorcycle(&draft).await.unwrap();
    assert_eq!(created.plate, "ABC1D23");
    assert!(created.flagged);
    assert_eq!(created.created_at.as_deref(), Some("2025-05-01T10:00:00"));

    {
        let guard = backend.lock().unwrap();
        assert_eq!(guard.motos[0]["roubada"], true);
        assert_eq!(guard.motos[0]["multa"], true);
    }

    let duplicate = client.create_motorcycle(&draft).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert_eq!(backend.lock().unwrap().motos.len(), 1);
}

#[tokio::test]
async fn test_update_keeps_plate_and_merges_fields() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);
    seed(&backend, "ABC1234", false, false);

    let update = MotorcycleUpdate {
        zone: Some("E".to_string()),
        ..Default::default()
    }
    .with_status(MotorcycleStatus::MechanicalIssue);

    let updated = client.update_motorcycle("abc1234", &update).await.unwrap();
    assert_eq!(updated.plate, "ABC1234");
    assert_eq!(updated.zone, "E");
    assert_eq!(updated.status(), MotorcycleStatus::MechanicalIssue);

    let missing = client.update_motorcycle("XYZ9876", &update).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_update_rejects_bad_input_before_request() {
    let client = create_client("http://127.0.0.1:9");

    let empty = client
        .update_motorcycle("ABC1234", &MotorcycleUpdate::default())
        .await;
    assert!(matches!(empty, Err(AppError::Validation(_))));

    let bad_plate = client
        .update_motorcycle("ABC", &MotorcycleUpdate::default().with_status(MotorcycleStatus::Ready))
        .await;
    assert!(matches!(bad_plate, Err(AppError::InvalidPlate(_))));
}

#[tokio::test]
async fn test_delete_reports_success_as_bool() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);
    seed(&backend, "ABC1234", false, false);

    assert!(client.delete_motorcycle("ABC1234").await.unwrap());
    assert!(!client.delete_motorcycle("ABC1234").await.unwrap());
    assert!(backend.lock().unwrap().motos.is_empty());
}

#[tokio::test]
async fn test_delete_rejects_bad_plate_before_request() {
    let client = create_client("http://127.0.0.1:9");

    let blank = client.delete_motorcycle("   ").await;
    assert!(matches!(blank, Err(AppError::InvalidPlate(_))));

    let short = client.delete_motorcycle("ABC").await;
    assert!(matches!(short, Err(AppError::InvalidPlate(_))));
}

#[tokio::test]
async fn test_login_stores_token_and_logout_clears_it() {
    let (base_url, _backend) = spawn_backend().await;
    let client = create_client(&base_url);

    let rejected = client
        .login(&LoginRequest::new("ana@motoscan.com", "errada"))
        .await;
    assert!(matches!(rejected, Err(AppError::Unauthorized(_))));
    assert_eq!(client.session().get_token().await.unwrap(), None);

    let token = client
        .login(&LoginRequest::new("ana@motoscan.com", "segredo"))
        .await
        .unwrap();
    assert_eq!(token, "token-123");
    assert_eq!(
        client.session().get_token().await.unwrap().as_deref(),
        Some("token-123")
    );

    client.logout().await.unwrap();
    assert_eq!(client.session().get_token().await.unwrap(), None);
}

#[tokio::test]
async fn test_register_validates_before_sending() {
    let (base_url, backend) = spawn_backend().await;
    let client = create_client(&base_url);

    let invalid = client
        .register(&RegisterRequest::new("Ana", "sem-arroba", "segredo"))
        .await;
    assert!(matches!(invalid, Err(AppError::Validation(_))));
    assert_eq!(backend.lock().unwrap().register_calls, 0);

    let ok = client
        .register(&RegisterRequest::new("Ana", "ana@motoscan.com", "segredo"))
        .await
        .unwrap();
    assert!(ok);
    assert_eq!(backend.lock().unwrap().register_calls, 1);
}
