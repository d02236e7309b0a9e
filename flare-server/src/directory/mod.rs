mod room_directory;
mod shared_directory;

pub use room_directory::*;
pub use shared_directory::*;
