pub mod progress;
pub mod users;
