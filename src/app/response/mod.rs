use clientes_core::response::CoreResponse;

pub const LIST_FAILED: &str = "Error al obtener clientes";
pub const CREATE_FAILED: &str = "Error al crear cliente";
pub const MISSING_FIELDS: &str = "Faltan datos obligatorios";

/// Fixed error body; never carries the underlying cause.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse { error: error.into() }
    }
}

#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

pub type ClientesResponse<T> = CoreResponse<T, ErrorResponse>;
