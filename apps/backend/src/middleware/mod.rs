pub mod cors;

pub use cors::PermissiveCors;
