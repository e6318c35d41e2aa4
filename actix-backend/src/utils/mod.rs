pub mod auth;
pub mod urls;

