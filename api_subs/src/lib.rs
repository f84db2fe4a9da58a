use actix_web::dev::HttpServiceFactory;

pub mod dtos {
    pub mod sub;
}
pub mod routes {
    pub mod sub;
}
pub mod services {
    pub mod sub;
}

/// Subscription endpoints for the authenticated user.
pub fn mount_subs() -> impl HttpServiceFactory {
    (routes::sub::put_subscription, routes::sub::post_cancel)
}
