//! Room aggregate
//!
//! Rooms are the first entity served through the generic list-query engine.

pub mod model;
pub mod repository;

pub use model::Room;
pub use repository::RoomRepository;
