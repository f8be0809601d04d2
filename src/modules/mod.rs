pub mod auth;
pub mod tax_types;
pub mod users;
