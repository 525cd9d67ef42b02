use axum::Router;
use clientes_core::controller::Controller;
use tower_http::trace::TraceLayer;

use crate::app::{
    controller::{ClientesController, HealthController},
    state::AppState,
};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .merge(HealthController::router())
        .merge(ClientesController::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use chrono::{NaiveDateTime, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::app::{
        entity::Cliente,
        store::{ClienteStore, MemoryClienteStore, NewCliente, StoreError},
    };

    /// Store whose backend is always down.
    struct UnreachableStore;

    #[async_trait]
    impl ClienteStore for UnreachableStore {
        async fn list(&self) -> Result<Vec<Cliente>, StoreError> {
            Err(StoreError::Database(sea_orm::DbErr::Custom("connection refused on 10.0.0.7".into())))
        }

        async fn insert(&self, _nuevo: NewCliente) -> Result<Cliente, StoreError> {
            Err(StoreError::Database(sea_orm::DbErr::Custom("connection refused on 10.0.0.7".into())))
        }
    }

    fn app() -> Router {
        routes(AppState::new("Hola Microservicio", Arc::new(MemoryClienteStore::default())))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/clientes")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn count(app: &Router) -> usize {
        let (_, body) = send(app, get("/clientes")).await;
        body.as_array().unwrap().len()
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let (status, body) = send(&app(), get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "service": "Hola Microservicio"}));
    }

    #[tokio::test]
    async fn health_ignores_storage_state() {
        let app = routes(AppState::new("svc", Arc::new(UnreachableStore)));

        let (status, body) = send(&app, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn list_is_empty_array_without_rows() {
        let (status, body) = send(&app(), get("/clientes")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_returns_stored_record() {
        let app = app();
        let before = Utc::now().naive_utc();

        let (status, body) = send(&app, post_json(json!({"nombre": "Ana", "email": "ana@example.com"}))).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["nombre"], "Ana");
        assert_eq!(body["email"], "ana@example.com");
        assert!(body["id"].as_i64().unwrap() > 0);

        let creado_en: NaiveDateTime = serde_json::from_value(body["creado_en"].clone()).unwrap();
        assert!(creado_en >= before);
    }

    #[tokio::test]
    async fn create_accepts_form_bodies() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/clientes")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("nombre=Luis&email=luis%40example.com"))
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["email"], "luis@example.com");
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_without_writing() {
        let app = app();

        for payload in [
            json!({"nombre": "Ana"}),
            json!({"email": "ana@example.com"}),
            json!({"nombre": "", "email": ""}),
            json!({"nombre": null, "email": "ana@example.com"}),
        ] {
            let (status, body) = send(&app, post_json(payload)).await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({"error": "Faltan datos obligatorios"}));
        }

        assert_eq!(count(&app).await, 0);
    }

    #[tokio::test]
    async fn create_treats_unreadable_body_as_missing_data() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/clientes")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Faltan datos obligatorios");
    }

    #[tokio::test]
    async fn duplicate_email_is_a_server_error() {
        let app = app();

        let (first, _) = send(&app, post_json(json!({"nombre": "Ana", "email": "ana@example.com"}))).await;
        let (second, body) = send(&app, post_json(json!({"nombre": "Otra", "email": "ana@example.com"}))).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Error al crear cliente"}));
        assert_eq!(count(&app).await, 1);
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let app = app();
        for n in 1..=3 {
            let payload = json!({"nombre": format!("c{n}"), "email": format!("c{n}@example.com")});
            send(&app, post_json(payload)).await;
        }

        let (status, body) = send(&app, get("/clientes")).await;
        let ids: Vec<i64> = body.as_array().unwrap().iter().map(|c| c["id"].as_i64().unwrap()).collect();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn storage_errors_do_not_leak() {
        let app = routes(AppState::new("svc", Arc::new(UnreachableStore)));

        let (list_status, list_body) = send(&app, get("/clientes")).await;
        let (create_status, create_body) =
            send(&app, post_json(json!({"nombre": "Ana", "email": "ana@example.com"}))).await;

        assert_eq!(list_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(list_body, json!({"error": "Error al obtener clientes"}));
        assert_eq!(create_status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(create_body, json!({"error": "Error al crear cliente"}));
    }
}
