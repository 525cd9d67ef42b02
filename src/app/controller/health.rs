use axum::{Json, extract::State};

use crate::app::{response::HealthResponse, state::AppState};

pub struct HealthController;

#[clientes_macros::controller(state = AppState)]
impl HealthController {
    /// Liveness only; storage is not consulted.
    #[clientes_macros::get("/")]
    #[clientes_macros::utoipa_response(status = 200, body = HealthResponse, description = "Service is running")]
    pub async fn index(State(state): State<AppState>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok".into(),
            service: state.service_name.to_string(),
        })
    }
}
