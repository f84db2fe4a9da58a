use std::{future::Future, pin::Pin, sync::Arc};

use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use futures::future::{Ready, ok};

use common::{env_config::JwtConfig, error::AppError, jwt};

/// Rejects any request without a valid bearer token and makes the decoded
/// claims available to handlers via `web::ReqData<JwtClaims>`.
pub struct AuthMiddleware {
    jwt_config: Arc<JwtConfig>,
}

impl AuthMiddleware {
    pub fn new(jwt_config: JwtConfig) -> Self {
        AuthMiddleware {
            jwt_config: Arc::new(jwt_config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Arc::new(service),
            jwt_config: self.jwt_config.clone(),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Arc<S>,
    jwt_config: Arc<JwtConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // retrieve token from authorization header
        let token_value = req
            .headers()
            .get("Authorization")
            .and_then(|header| header.to_str().ok())
            .and_then(|header| {
                header
                    .strip_prefix("Bearer ")
                    .map(|token| token.to_string())
            });

        let secret = self.jwt_config.secret.clone();
        let srv = Arc::clone(&self.service);

        Box::pin(async move {
            if let Some(token) = token_value {
                // validate token and insert claims to request object for handler use
                match jwt::validate_jwt(&token, &secret) {
                    Ok(claims) => {
                        req.extensions_mut().insert(claims);
                        srv.call(req).await.map(|res| res.map_into_boxed_body())
                    }
                    Err(_) => {
                        let response = AppError::Unauthorized("Invalid token".to_string())
                            .to_http_response()
                            .map_into_boxed_body();
                        Ok(req.into_response(response))
                    }
                }
            } else {
                // no token passed - 401
                let response =
                    AppError::Unauthorized("No authorization token provided".to_string())
                        .to_http_response()
                        .map_into_boxed_body();
                Ok(req.into_response(response))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, HttpResponse, test, web};
    use common::jwt::{ClaimsSpec, JwtClaims};
    use uuid::Uuid;

    fn test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
        }
    }

    async fn echo_user_id(claims: web::ReqData<JwtClaims>) -> HttpResponse {
        HttpResponse::Ok().json(claims.user_id)
    }

    #[actix_web::test]
    async fn missing_token_gets_401() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(test_jwt_config()))
                .route("/me", web::get().to(echo_user_id)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn garbage_token_gets_401() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(test_jwt_config()))
                .route("/me", web::get().to(echo_user_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }

    #[actix_web::test]
    async fn valid_token_reaches_handler_with_claims() {
        let config = test_jwt_config();
        let user_id = Uuid::new_v4();
        let token = jwt::generate_jwt(ClaimsSpec { user_id }, &config).unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(config))
                .route("/me", web::get().to(echo_user_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert!(res.status().is_success());

        let body: Uuid = test::read_body_json(res).await;
        assert_eq!(body, user_id);
    }

    #[actix_web::test]
    async fn expired_token_gets_401() {
        let config = test_jwt_config();
        let expired = JwtConfig {
            secret: config.secret.clone(),
            expiration_hours: -1,
        };
        let token = jwt::generate_jwt(
            ClaimsSpec {
                user_id: Uuid::new_v4(),
            },
            &expired,
        )
        .unwrap();

        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware::new(config))
                .route("/me", web::get().to(echo_user_id)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), 401);
    }
}
