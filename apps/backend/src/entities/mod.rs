pub mod game_progress;
pub mod users;
