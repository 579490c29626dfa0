//! Relational schema, migrations, and a validating data-access layer for a
//! small e-commerce storefront.

pub mod config;
pub mod db;
pub mod dto;
pub mod entity;
pub mod error;
pub mod migration;
pub mod schema;
pub mod services;
pub mod state;
pub mod validate;
