use crate::{
    auth::{
        hash_password, verify_password, AuthMiddleware, AuthenticatedUser, HashCost, LoginRequest,
        RefreshRequest, RegisterRequest, TokenKind, TokenService,
    },
    error::AppError,
    models::{NewUser, UserInfo},
    store::UserStore,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// Responds with an empty `200 OK`; the client logs in separately.
#[post("/register")]
pub async fn register(
    users: web::Data<dyn UserStore>,
    cost: web::Data<HashCost>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    // The store rejects duplicate emails atomically.
    let password_hash = hash_password(&register_data.password, cost.0)?;
    let user = users
        .create(NewUser::new(&register_data.email, password_hash))
        .await?;
    log::info!("Registered user {}", user.id);

    Ok(HttpResponse::Ok().finish())
}

/// Login user
///
/// Exchanges email and password for an access/refresh token pair.
#[post("/login")]
pub async fn login(
    users: web::Data<dyn UserStore>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = users.find_by_email(&login_data.email).await?;
    let verified = match &user {
        Some(user) => verify_password(&login_data.password, &user.password_hash)?,
        None => false,
    };

    match user {
        Some(user) if verified => Ok(HttpResponse::Ok().json(tokens.issue(&user)?)),
        _ => {
            log::warn!("Failed login attempt for {}", login_data.email);
            Err(AppError::Unauthorized("Invalid credentials".into()))
        }
    }
}

/// Refresh tokens
///
/// Trades a refresh token for a new pair. The token is rejected when its user
/// no longer exists or the user's security stamp has changed since issue.
#[post("/refresh")]
pub async fn refresh(
    users: web::Data<dyn UserStore>,
    tokens: web::Data<TokenService>,
    refresh_data: web::Json<RefreshRequest>,
) -> Result<impl Responder, AppError> {
    let claims = tokens.verify(&refresh_data.refresh_token, TokenKind::Refresh)?;

    let user = users
        .find_by_id(claims.sub)
        .await?
        .filter(|user| user.security_stamp == claims.stamp)
        .ok_or_else(|| AppError::Unauthorized("Refresh token is no longer valid".into()))?;

    Ok(HttpResponse::Ok().json(tokens.issue(&user)?))
}

/// Current user info
///
/// Requires a bearer token.
#[get("/manage/info", wrap = "AuthMiddleware")]
pub async fn manage_info(
    users: web::Data<dyn UserStore>,
    principal: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let user = users
        .find_by_id(principal.id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;

    Ok(HttpResponse::Ok().json(UserInfo::from(&user)))
}
