pub mod model;

pub use model::{
    Claim, Envelope, ExitArgs, MembersArgs, RelayArgs, RoomId, SessionKey, SignalError, TenantId,
};
