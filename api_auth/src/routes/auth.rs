use actix_web::{Responder, get, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{
    LoginRequest, LoginResponse, LoginUser, MessageResponse, SignupRequest, SignupResponse,
    VerifyEmailQuery,
};
use crate::services;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload containing name, email and password
/// - `pool`: Database connection pool
/// - `config`: Application configuration
///
/// # Output
/// - Success: 201 Created with a bearer token; the verification mail is
///   dispatched after the account is committed
/// - Error: Returns 400 Bad Request if the email already exists
///
/// # Frontend Example
/// ```javascript
/// // Using fetch API
/// const response = await fetch('/api/signup', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({
///     name: 'Jane Doe',
///     email: 'user@example.com',
///     password: 'securepassword'
///   })
/// });
///
/// if (response.ok) {
///   const data = await response.json();
///   localStorage.setItem('authToken', data.token);
/// }
/// ```
#[post("/signup")]
pub async fn post_signup(
    req: web::Json<SignupRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let email_exists = services::user::exists_user_by_email(pg_pool, &req.email).await?;
    if email_exists {
        return Err(AppError::BadRequest("User already exists".to_string()));
    }

    let user = services::user::create_user_with_credentials(pg_pool, &req).await?;

    // account is committed; mail failure must not undo it
    if let Some(token) = user.verification_token.clone() {
        services::mail::spawn_verification_email(config.get_ref().clone(), user.email.clone(), token);
    }

    let token = jwt::generate_jwt(ClaimsSpec { user_id: user.id }, &config.jwt_config)?;
    Success::created(SignupResponse {
        message: "User registered successfully. Please check your email for verification."
            .to_string(),
        token,
    })
}

/// Authenticates a user with email and password.
///
/// # Input
/// - `login_data`: JSON payload containing email and password
/// - `config`: Application configuration for JWT generation
/// - `pool`: Database connection pool
///
/// # Output
/// - Success: Returns an auth response with JWT token and user details
/// - Error: Returns 400 Bad Request for invalid credentials
///
/// # Frontend Example
/// ```javascript
/// // Using fetch API
/// const response = await fetch('/api/login', {
///   method: 'POST',
///   headers: {
///     'Content-Type': 'application/json'
///   },
///   body: JSON.stringify({
///     email: 'user@example.com',
///     password: 'securepassword'
///   })
/// });
///
/// if (response.ok) {
///   const authData = await response.json();
///   // Store token for authenticated requests
///   localStorage.setItem('authToken', authData.token);
///   console.log('Logged in user:', authData.user);
/// }
/// ```
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data).await?;
    let token = jwt::generate_jwt(ClaimsSpec { user_id: user.id }, &config.jwt_config)?;
    Success::ok(LoginResponse {
        message: "Logged in successfully".to_string(),
        token,
        user: LoginUser::from(&user),
    })
}

/// Consumes a verification token from the mailed link and marks the
/// account's email as verified. Invalid or already-used tokens get 400.
#[get("/verify-email")]
pub async fn get_verify_email(
    query: web::Query<VerifyEmailQuery>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    services::user::verify_email(pg_pool, &query.token).await?;
    Success::ok(MessageResponse {
        message: "Email verified successfully".to_string(),
    })
}
