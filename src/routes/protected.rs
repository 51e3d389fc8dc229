use crate::auth::{AuthMiddleware, AuthenticatedUser};
use actix_web::{get, HttpResponse, Responder};

/// Greets the authenticated caller. Requires a bearer token.
#[get("/requires-auth", wrap = "AuthMiddleware")]
pub async fn requires_auth(principal: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(format!("Hello, {}!", principal.name))
}
