//! Room use cases

pub mod service;

pub use service::{RoomService, NO_ROOMS_FOUND, ROOMS_RETRIEVED};
