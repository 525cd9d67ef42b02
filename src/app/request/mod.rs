use serde::Deserialize;

use crate::app::store::NewCliente;

/// Body of `POST /clientes`, JSON or url-encoded. Both fields are optional
/// here so a missing field is a validation failure rather than a body error.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ClientePayload {
    #[schema(example = "Ana")]
    pub nombre: Option<String>,
    #[schema(example = "ana@example.com")]
    pub email: Option<String>,
}

impl ClientePayload {
    /// `None` unless both fields are present and non-empty.
    pub fn validate(self) -> Option<NewCliente> {
        let nombre = self.nombre.filter(|nombre| !nombre.is_empty())?;
        let email = self.email.filter(|email| !email.is_empty())?;

        Some(NewCliente { nombre, email })
    }
}
