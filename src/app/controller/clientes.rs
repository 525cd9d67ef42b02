use axum::extract::State;
use clientes_core::{
    extract::{BodyRejection, JsonOrForm},
    response::CoreResponse,
};

use crate::app::{
    entity::Cliente,
    request::ClientePayload,
    response::{CREATE_FAILED, ClientesResponse, ErrorResponse, LIST_FAILED, MISSING_FIELDS},
    state::AppState,
};

pub struct ClientesController;

#[clientes_macros::controller(state = AppState)]
impl ClientesController {
    #[clientes_macros::get("/clientes")]
    #[clientes_macros::utoipa_response(status = 200, body = Vec<Cliente>, description = "All clients, newest first")]
    #[clientes_macros::utoipa_response(status = 500, body = ErrorResponse, description = "Storage error")]
    pub async fn index(State(state): State<AppState>) -> ClientesResponse<Vec<Cliente>> {
        match state.store.list().await {
            Ok(clientes) => CoreResponse::Ok(clientes),
            Err(err) => {
                tracing::error!("cannot list clientes: {:?}", err);

                CoreResponse::InternalServerError(ErrorResponse::new(LIST_FAILED))
            }
        }
    }

    #[clientes_macros::post("/clientes")]
    #[clientes_macros::utoipa_request_body(ClientePayload)]
    #[clientes_macros::utoipa_response(status = 201, body = Cliente, description = "Client created")]
    #[clientes_macros::utoipa_response(status = 400, body = ErrorResponse, description = "Missing `nombre` or `email`")]
    #[clientes_macros::utoipa_response(status = 500, body = ErrorResponse, description = "Storage error, including a taken email")]
    pub async fn store(
        State(state): State<AppState>,
        payload: Result<JsonOrForm<ClientePayload>, BodyRejection>,
    ) -> ClientesResponse<Cliente> {
        // an unreadable body is treated like an empty one
        let payload = payload.map(|JsonOrForm(payload)| payload).unwrap_or_else(|rejection| {
            tracing::debug!("unreadable body on POST /clientes: {}", rejection);
            ClientePayload::default()
        });

        let Some(nuevo) = payload.validate() else {
            return CoreResponse::BadRequest(ErrorResponse::new(MISSING_FIELDS));
        };

        match state.store.insert(nuevo).await {
            Ok(cliente) => {
                tracing::info!(id = cliente.id, "cliente created");

                CoreResponse::Created(cliente)
            }
            Err(err) => {
                tracing::error!("cannot create cliente: {:?}", err);

                CoreResponse::InternalServerError(ErrorResponse::new(CREATE_FAILED))
            }
        }
    }
}
