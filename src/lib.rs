pub mod clock;
pub mod compute;
pub mod config;
pub mod cooldown;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod spawner;

pub use config::GameConfig;
pub use error::{ConfigError, GameError};
pub use session::Session;
