use actix_web::{body::BoxBody, http::header, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

/// Outcome of a resource handler, rendered to HTTP in one place.
///
/// `NotFound` here means "no such entity" and renders as a bare 404 with no
/// body, unlike `AppError::NotFound`.
#[derive(Debug, PartialEq)]
pub enum ApiResult<T> {
    Ok(T),
    /// The entity and the path of the resource that now serves it.
    Created(T, String),
    NoContent,
    NotFound,
}

impl<T> ApiResult<T> {
    /// `Ok(value)` when present, `NotFound` otherwise.
    pub fn found(value: Option<T>) -> Self {
        value.map_or(ApiResult::NotFound, ApiResult::Ok)
    }
}

impl<T: Serialize> Responder for ApiResult<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        match self {
            ApiResult::Ok(value) => HttpResponse::Ok().json(value),
            ApiResult::Created(value, location) => HttpResponse::Created()
                .insert_header((header::LOCATION, location))
                .json(value),
            ApiResult::NoContent => HttpResponse::NoContent().finish(),
            ApiResult::NotFound => HttpResponse::NotFound().finish(),
        }
    }
}
