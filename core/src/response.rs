use axum::{response::IntoResponse, http::StatusCode, Json};

/// Response shape shared by every JSON handler: `T` on success, `E` as the
/// error payload.
pub enum CoreResponse<T, E>
where T: serde::Serialize,
      E: serde::Serialize
{
    Ok(T),
    Created(T),
    BadRequest(E),
    InternalServerError(E),
}

impl<T, E> CoreResponse<T, E>
where T: serde::Serialize,
      E: serde::Serialize
{
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Ok(_) => StatusCode::OK,
            Self::Created(_) => StatusCode::CREATED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T, E> IntoResponse for CoreResponse<T, E>
where T: serde::Serialize,
      E: serde::Serialize
{
    fn into_response(self) -> axum::response::Response {
        let status = self.status();

        match self {
            Self::Ok(data) | Self::Created(data) => (status, Json(data)).into_response(),
            Self::BadRequest(error) | Self::InternalServerError(error) => (status, Json(error)).into_response(),
        }
    }
}
