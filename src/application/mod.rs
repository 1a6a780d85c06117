//! Application layer: use cases and the response envelope.

pub mod envelope;
pub mod rooms;

pub use envelope::{ResponseError, ResultEnvelope};
pub use rooms::RoomService;
