pub mod auth_token;
pub mod session;
