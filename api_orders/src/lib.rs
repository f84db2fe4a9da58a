use actix_web::dev::HttpServiceFactory;

pub mod dtos {
    pub mod order;
}
pub mod routes {
    pub mod checkout;
    pub mod order;
}
pub mod services {
    pub mod order;
}

/// Checkout and order endpoints for the authenticated user.
pub fn mount_orders() -> impl HttpServiceFactory {
    (
        routes::checkout::post_checkout_details,
        routes::order::get_order,
        routes::order::post_verify_payment,
        routes::order::post_update_status,
    )
}
