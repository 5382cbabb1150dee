pub mod claims;
pub mod google;
pub mod jwt;
