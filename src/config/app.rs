//! Route wiring for the customer data API.

use actix_web::web;

use crate::api::{customer_controller, health_controller};

pub fn config_services(cfg: &mut web::ServiceConfig) {
    log::info!("Configuring routes");
    cfg.service(health_controller::health)
        .service(health_controller::operation_metrics)
        .service(
            web::resource("/customer")
                .route(web::get().to(customer_controller::get_customer))
                .route(web::put().to(customer_controller::create_customer))
                .route(web::post().to(customer_controller::update_customer))
                .route(web::delete().to(customer_controller::delete_customer)),
        )
        .service(
            web::resource("/customerByEmail")
                .route(web::get().to(customer_controller::get_customer_by_email)),
        )
        .service(web::resource("/customers").route(web::get().to(customer_controller::get_customers)));
}
