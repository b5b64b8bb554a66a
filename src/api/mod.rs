pub mod customer_controller;
pub mod health_controller;
