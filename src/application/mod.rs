mod config;
mod session;

pub use config::{Config, ConfigError};
pub use session::{Command, RunState, Session, World};
