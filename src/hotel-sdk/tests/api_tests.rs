mod stub;

use chrono::NaiveDate;
use hotel_sdk::hotel_api::{ClientDraft, ReservationDraft, ReservationStatus, ServiceDraft};
use hotel_sdk::{DashboardCounts, HotelClient, SdkError};

async fn signed_in() -> (HotelClient, stub::Shared) {
    let (url, state) = stub::spawn().await;
    let mut client = HotelClient::new(&url).unwrap();
    client.login("admin@hotelsgs.com", "secret").await.unwrap();
    (client, state)
}

#[tokio::test]
async fn login_stores_token_and_attaches_it() {
    let (url, state) = stub::spawn().await;
    let mut client = HotelClient::new(&url).unwrap();

    let token = client.login("admin@hotelsgs.com", "secret").await.unwrap();
    assert_eq!(token.as_deref(), Some(stub::TOKEN));
    assert_eq!(client.token(), Some(stub::TOKEN));

    client.list_clients(false).await.unwrap();

    let guard = state.lock().unwrap();
    // The login request itself went out without a token
    assert_eq!(guard.auth_headers[0], None);
    assert_eq!(
        guard.auth_headers.last().unwrap().as_deref(),
        Some("Bearer tok-123")
    );
}

#[tokio::test]
async fn login_accepts_pascal_case_token() {
    let (url, _state) = stub::spawn().await;
    let mut client = HotelClient::new(&url).unwrap();
    let token = client.login("legacy@hotelsgs.com", "x").await.unwrap();
    assert_eq!(token.as_deref(), Some("legacy-token"));
}

#[tokio::test]
async fn login_without_token_still_succeeds() {
    let (url, _state) = stub::spawn().await;
    let mut client = HotelClient::new(&url).unwrap();
    let token = client.login("tokenless@hotelsgs.com", "x").await.unwrap();
    assert!(token.is_none());
    assert!(client.token().is_none());
}

#[tokio::test]
async fn login_rejected_maps_to_invalid_credentials() {
    let (url, _state) = stub::spawn().await;
    let mut client = HotelClient::new(&url).unwrap();
    let err = client
        .login("admin@hotelsgs.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::InvalidCredentials));
    assert!(client.token().is_none());
}

#[tokio::test]
async fn logout_drops_authorization_header() {
    let (mut client, state) = signed_in().await;
    client.logout();
    client.list_services().await.unwrap();
    let guard = state.lock().unwrap();
    assert_eq!(guard.auth_headers.last().unwrap(), &None);
}

#[tokio::test]
async fn client_lists_honour_active_filter() {
    let (client, _state) = signed_in().await;
    assert_eq!(client.list_clients(false).await.unwrap().len(), 2);

    let active = client.list_clients(true).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].email, "ana@example.com");
}

#[tokio::test]
async fn client_search_by_email() {
    let (client, _state) = signed_in().await;

    let found = client.search_clients("luis@example.com", false).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].cliente_id, 2);

    let missing = client
        .search_clients("nobody@example.com", false)
        .await
        .unwrap();
    assert!(missing.is_empty());

    let blank = client.search_clients("   ", true).await.unwrap();
    assert_eq!(blank.len(), 1);
}

#[tokio::test]
async fn client_crud_round() {
    let (client, state) = signed_in().await;

    let created = client
        .create_client(&ClientDraft {
            nombre: "Marta Ruiz".into(),
            email: "marta@example.com".into(),
            telefono: "3110000000".into(),
            ..Default::default()
        })
        .await
        .unwrap()
        .expect("stub echoes the created client");
    assert_eq!(created.cliente_id, 3);
    assert!(
        state
            .lock()
            .unwrap()
            .last_body
            .as_ref()
            .unwrap()
            .get("clienteId")
            .is_none()
    );

    let mut draft = ClientDraft::from(&created);
    draft.direccion = "Carrera 7".into();
    client.update_client(created.cliente_id, &draft).await.unwrap();

    client.toggle_client(created.cliente_id).await.unwrap();
    let updated = client
        .find_client_by_email("marta@example.com")
        .await
        .unwrap();
    assert_eq!(updated.direccion.as_deref(), Some("Carrera 7"));
    assert!(!updated.activo);

    client.delete_client(created.cliente_id).await.unwrap();
    assert_eq!(client.list_clients(false).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_client_draft_is_not_sent() {
    let (client, state) = signed_in().await;
    let before = state.lock().unwrap().auth_headers.len();

    let err = client
        .create_client(&ClientDraft {
            nombre: "Sin correo".into(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SdkError::Validation(_)));
    assert_eq!(state.lock().unwrap().auth_headers.len(), before);
}

#[tokio::test]
async fn api_error_message_is_extracted() {
    let (client, _state) = signed_in().await;
    let err = client.delete_client(99).await.unwrap_err();
    match err {
        SdkError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Cliente no encontrado");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn service_search_and_toggle() {
    let (client, state) = signed_in().await;

    let found = client.search_services("masaje").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].nombre, "Spa");

    let now_active = client.toggle_service(&found[0]).await.unwrap();
    assert!(!now_active);
    let body = state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["activo"], false);
    assert_eq!(body["servicioId"], 1);
    assert_eq!(body["precio"], 120000.0);
}

#[tokio::test]
async fn service_create_update_delete() {
    let (client, _state) = signed_in().await;

    let created = client
        .create_service(&ServiceDraft {
            nombre: "Lavandería".into(),
            precio: 15000.0,
            duracion_minutos: 60,
            ..Default::default()
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(created.servicio_id, 3);

    let mut draft = ServiceDraft::from(&created);
    draft.precio = 18000.0;
    client.update_service(created.servicio_id, &draft).await.unwrap();

    let services = client.list_services().await.unwrap();
    let stored = services
        .iter()
        .find(|s| s.servicio_id == created.servicio_id)
        .unwrap();
    assert!((stored.precio - 18000.0).abs() < f64::EPSILON);

    client.delete_service(created.servicio_id).await.unwrap();
    assert_eq!(client.list_services().await.unwrap().len(), 2);
}

#[tokio::test]
async fn reservation_search_by_client() {
    let (client, _state) = signed_in().await;

    assert_eq!(client.search_reservations("").await.unwrap().len(), 2);

    let for_ana = client.search_reservations("1").await.unwrap();
    assert_eq!(for_ana.len(), 1);
    assert_eq!(for_ana[0].habitacion, "204");

    assert!(client.search_reservations("42").await.unwrap().is_empty());

    assert!(client.search_reservations("abc").await.unwrap().is_empty());
    assert!(client.search_reservations("3.5").await.unwrap().is_empty());
}

#[tokio::test]
async fn reservation_status_cycles_through_patch() {
    let (client, state) = signed_in().await;
    let reservations = client.list_reservations().await.unwrap();

    let pending = &reservations[0];
    assert_eq!(pending.estado, ReservationStatus::Pending);
    let next = client.cycle_reservation_status(pending).await.unwrap();
    assert_eq!(next, ReservationStatus::Confirmed);

    let cancelled = &reservations[1];
    let next = client.cycle_reservation_status(cancelled).await.unwrap();
    assert_eq!(next, ReservationStatus::Pending);

    let guard = state.lock().unwrap();
    assert_eq!(
        guard.status_changes,
        vec![(10, "Confirmada".to_string()), (11, "Pendiente".to_string())]
    );
}

#[tokio::test]
async fn reservation_create_sends_clean_body() {
    let (client, state) = signed_in().await;
    let draft = ReservationDraft {
        cliente_id: Some(1),
        servicio_id: Some(2),
        habitacion: "305".into(),
        fecha_entrada: NaiveDate::from_ymd_opt(2025, 6, 1),
        fecha_salida: NaiveDate::from_ymd_opt(2025, 6, 4),
        cantidad_personas: 3,
        ..Default::default()
    };

    let created = client.create_reservation(&draft).await.unwrap().unwrap();
    assert_eq!(created.reserva_id, 12);

    let body = state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["reservaId"], 0);
    assert_eq!(body["fechaEntrada"], "2025-06-01");
    assert_eq!(body["estado"], "Pendiente");
    assert_eq!(body["descripcion"], "");

    let mut edit = ReservationDraft::from(&created);
    edit.habitacion = "306".into();
    client
        .update_reservation(created.reserva_id, &edit)
        .await
        .unwrap();
    let body = state.lock().unwrap().last_body.clone().unwrap();
    assert_eq!(body["reservaId"], 12);
    assert_eq!(body["habitacion"], "306");

    client.delete_reservation(created.reserva_id).await.unwrap();
    assert_eq!(client.list_reservations().await.unwrap().len(), 2);
}

#[tokio::test]
async fn dashboard_counts_all_collections() {
    let (client, _state) = signed_in().await;
    let counts = client.dashboard_counts().await.unwrap();
    assert_eq!(
        counts,
        DashboardCounts {
            clients: 2,
            services: 2,
            reservations: 2,
        }
    );
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HotelClient::new(&format!("http://{addr}/api")).unwrap();
    let err = client.list_services().await.unwrap_err();
    assert!(matches!(err, SdkError::Http(_)));
}
