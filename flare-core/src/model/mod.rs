mod claim;
mod envelope;
mod error;

pub use claim::{Claim, RoomId, SessionKey, TenantId};
pub use envelope::{Envelope, ExitArgs, MembersArgs, RelayArgs};
pub use error::SignalError;
