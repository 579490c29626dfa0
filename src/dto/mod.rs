pub mod accounts;
pub mod catalog;
pub mod orders;
pub mod reviews;
