pub mod auth;
pub mod config;
pub mod directory;
pub mod dispatch;
pub mod lifecycle;
pub mod session;

pub use auth::{ClaimsValidator, JwtValidator};
pub use config::Config;
pub use directory::{DirectoryEntry, RoomDirectory, SharedDirectory};
pub use lifecycle::{AppState, router};
pub use session::{FrameSink, Session};
