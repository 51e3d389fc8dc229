#![allow(dead_code)]

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use mintodo::auth::{AccessTokenResponse, HashCost, TokenService};
use mintodo::AppServices;
use serde_json::json;

pub const TEST_SECRET: &str = "integration_test_secret";

/// In-memory services with a cheap bcrypt cost so tests stay fast.
pub fn services() -> AppServices {
    let tokens = TokenService::new(TEST_SECRET, 3600, 7200).expect("valid token lifetimes");
    AppServices::in_memory(tokens, HashCost(4))
}

/// Status of a response, including errors raised by middleware before a
/// handler produced a response.
pub fn status_of<B>(result: Result<ServiceResponse<B>, Error>) -> StatusCode {
    match result {
        Ok(resp) => resp.status(),
        Err(err) => err.as_response_error().status_code(),
    }
}

pub async fn register_and_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
    >,
    email: &str,
    password: &str,
) -> Result<AccessTokenResponse, String> {
    let req = test::TestRequest::post()
        .uri("/identity/register")
        .set_json(json!({"email": email, "password": password}))
        .to_request();
    let resp = test::call_service(app, req).await;
    if !resp.status().is_success() {
        let status = resp.status();
        let body = test::read_body(resp).await;
        return Err(format!(
            "Failed to register user. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }

    let req = test::TestRequest::post()
        .uri("/identity/login")
        .set_json(json!({"email": email, "password": password}))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    if !status.is_success() {
        return Err(format!(
            "Failed to log in. Status: {}. Body: {}",
            status,
            String::from_utf8_lossy(&body)
        ));
    }
    serde_json::from_slice(&body).map_err(|e| format!("Failed to parse login response: {}", e))
}
