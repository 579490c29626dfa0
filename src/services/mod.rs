pub mod account_service;
pub mod appointment_service;
pub mod cart_service;
pub mod cascade;
pub mod catalog_service;
pub mod order_service;
pub mod review_service;
