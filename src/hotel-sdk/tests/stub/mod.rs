//! In-process stand-in for the hotel API, good enough to exercise the SDK.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-123";

#[derive(Default)]
pub struct StubState {
    pub clients: Vec<Value>,
    pub services: Vec<Value>,
    pub reservations: Vec<Value>,
    /// Authorization header of every request, in arrival order
    pub auth_headers: Vec<Option<String>>,
    /// Status values received by the PATCH endpoint
    pub status_changes: Vec<(i64, String)>,
    /// Last JSON body received by a write endpoint
    pub last_body: Option<Value>,
}

pub type Shared = Arc<Mutex<StubState>>;

fn seeded() -> StubState {
    StubState {
        clients: vec![
            json!({"clienteId": 1, "nombre": "Ana Gómez", "email": "ana@example.com", "telefono": "3001234567", "direccion": "Calle 10", "activo": true}),
            json!({"clienteId": 2, "nombre": "Luis Pérez", "email": "luis@example.com", "telefono": null, "direccion": null, "activo": false}),
        ],
        services: vec![
            json!({"servicioId": 1, "nombre": "Spa", "descripcion": "Masaje relajante", "precio": 120000.0, "duracionMinutos": 90, "activo": true}),
            json!({"servicioId": 2, "nombre": "Desayuno", "descripcion": null, "precio": 25000.0, "duracionMinutos": 45, "activo": true}),
        ],
        reservations: vec![
            json!({"reservaId": 10, "clienteId": 1, "servicioId": 1, "habitacion": "204", "fechaEntrada": "2025-03-14T00:00:00", "fechaSalida": "2025-03-16T00:00:00", "cantidadPersonas": 2, "estado": "Pendiente", "descripcion": null}),
            json!({"reservaId": 11, "clienteId": 2, "servicioId": 2, "habitacion": "101", "fechaEntrada": "2025-04-01T00:00:00", "fechaSalida": "2025-04-02T00:00:00", "cantidadPersonas": 1, "estado": "Cancelada", "descripcion": "Vista al mar"}),
        ],
        ..Default::default()
    }
}

/// Start the stub on an ephemeral port. Returns the API base URL.
pub async fn spawn() -> (String, Shared) {
    let state: Shared = Arc::new(Mutex::new(seeded()));
    let app = router(state.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/api"), state)
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/Auth/login", post(login))
        .route("/api/Clientes", get(list_clients).post(create_client))
        .route("/api/Clientes/activos", get(list_active_clients))
        .route("/api/Clientes/email/:email", get(client_by_email))
        .route("/api/Clientes/:id", put(update_client).delete(delete_client))
        .route("/api/Clientes/:id/estado", put(toggle_client))
        .route("/api/Servicios", get(list_services).post(create_service))
        .route(
            "/api/Servicios/:id",
            put(update_service).delete(delete_service),
        )
        .route(
            "/api/Reservas",
            get(list_reservations).post(create_reservation),
        )
        .route("/api/Reservas/cliente/:id", get(reservations_by_client))
        .route(
            "/api/Reservas/:id",
            put(update_reservation).delete(delete_reservation),
        )
        .route(
            "/api/Reservas/:id/estado",
            axum::routing::patch(set_reservation_status),
        )
        .with_state(state)
}

fn record<'a>(state: &'a Shared, headers: &HeaderMap) -> std::sync::MutexGuard<'a, StubState> {
    let mut guard = state.lock().unwrap();
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    guard.auth_headers.push(auth);
    guard
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": format!("{what} no encontrado")})),
    )
        .into_response()
}

fn position(items: &[Value], key: &str, id: i64) -> Option<usize> {
    items.iter().position(|v| v[key].as_i64() == Some(id))
}

fn next_id(items: &[Value], key: &str) -> i64 {
    items.iter().filter_map(|v| v[key].as_i64()).max().unwrap_or(0) + 1
}

async fn login(State(state): State<Shared>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    let _guard = record(&state, &headers);
    if body["Email"] == "admin@hotelsgs.com" && body["Password"] == "secret" {
        Json(json!({"token": TOKEN})).into_response()
    } else if body["Email"] == "legacy@hotelsgs.com" {
        Json(json!({"Token": "legacy-token"})).into_response()
    } else if body["Email"] == "tokenless@hotelsgs.com" {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Credenciales inválidas"})),
        )
            .into_response()
    }
}

async fn list_clients(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<Value>> {
    let guard = record(&state, &headers);
    Json(guard.clients.clone())
}

async fn list_active_clients(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<Value>> {
    let guard = record(&state, &headers);
    Json(
        guard
            .clients
            .iter()
            .filter(|c| c["activo"] == true)
            .cloned()
            .collect(),
    )
}

async fn client_by_email(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(email): Path<String>,
) -> Response {
    let guard = record(&state, &headers);
    match guard.clients.iter().find(|c| c["email"] == email.as_str()) {
        Some(client) => Json(client.clone()).into_response(),
        None => not_found("Cliente"),
    }
}

async fn create_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    body["clienteId"] = json!(next_id(&guard.clients, "clienteId"));
    guard.clients.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    match position(&guard.clients, "clienteId", id) {
        Some(idx) => {
            guard.clients[idx] = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Cliente"),
    }
}

async fn toggle_client(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut guard = record(&state, &headers);
    match position(&guard.clients, "clienteId", id) {
        Some(idx) => {
            let active = guard.clients[idx]["activo"].as_bool().unwrap_or(false);
            guard.clients[idx]["activo"] = json!(!active);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Cliente"),
    }
}

async fn delete_client(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut guard = record(&state, &headers);
    match position(&guard.clients, "clienteId", id) {
        Some(idx) => {
            guard.clients.remove(idx);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Cliente"),
    }
}

async fn list_services(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<Value>> {
    let guard = record(&state, &headers);
    Json(guard.services.clone())
}

async fn create_service(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    body["servicioId"] = json!(next_id(&guard.services, "servicioId"));
    guard.services.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_service(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    match position(&guard.services, "servicioId", id) {
        Some(idx) => {
            guard.services[idx] = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Servicio"),
    }
}

async fn delete_service(State(state): State<Shared>, headers: HeaderMap, Path(id): Path<i64>) -> Response {
    let mut guard = record(&state, &headers);
    match position(&guard.services, "servicioId", id) {
        Some(idx) => {
            guard.services.remove(idx);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Servicio"),
    }
}

async fn list_reservations(State(state): State<Shared>, headers: HeaderMap) -> Json<Vec<Value>> {
    let guard = record(&state, &headers);
    Json(guard.reservations.clone())
}

async fn reservations_by_client(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let guard = record(&state, &headers);
    let found: Vec<Value> = guard
        .reservations
        .iter()
        .filter(|r| r["clienteId"].as_i64() == Some(id))
        .cloned()
        .collect();
    if found.is_empty() {
        not_found("Reservas del cliente")
    } else {
        Json(found).into_response()
    }
}

async fn create_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    body["reservaId"] = json!(next_id(&guard.reservations, "reservaId"));
    guard.reservations.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn update_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut guard = record(&state, &headers);
    guard.last_body = Some(body.clone());
    match position(&guard.reservations, "reservaId", id) {
        Some(idx) => {
            guard.reservations[idx] = body;
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Reserva"),
    }
}

async fn set_reservation_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut guard = record(&state, &headers);
    let Some(estado) = params.get("estado").cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"title": "Bad Request", "detail": "estado es obligatorio"})),
        )
            .into_response();
    };
    match position(&guard.reservations, "reservaId", id) {
        Some(idx) => {
            guard.reservations[idx]["estado"] = json!(estado.clone());
            guard.status_changes.push((id, estado));
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Reserva"),
    }
}

async fn delete_reservation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut guard = record(&state, &headers);
    match position(&guard.reservations, "reservaId", id) {
        Some(idx) => {
            guard.reservations.remove(idx);
            StatusCode::NO_CONTENT.into_response()
        }
        None => not_found("Reserva"),
    }
}
