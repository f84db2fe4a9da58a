use actix_web::dev::HttpServiceFactory;
use common::env_config::JwtConfig;
use middleware::auth::AuthMiddleware;

pub mod dtos {
    pub mod auth;
}
pub mod middleware {
    pub mod auth;
}
pub mod routes {
    pub mod auth;
    pub mod user;
}
pub mod services {
    pub mod auth;
    pub mod mail;
    pub mod user;
}

/// Bearer-token gate for everything under the protected scope.
pub fn auth_middleware(jwt_config: JwtConfig) -> AuthMiddleware {
    AuthMiddleware::new(jwt_config)
}

/// Signup, login and email verification; no token required.
pub fn mount_public() -> impl HttpServiceFactory {
    (
        routes::auth::post_signup,
        routes::auth::post_login,
        routes::auth::get_verify_email,
    )
}

/// Profile endpoints for the authenticated user.
pub fn mount_user() -> impl HttpServiceFactory {
    (routes::user::get_profile, routes::user::put_profile)
}
