//! Database entities module

pub mod room;

pub use room::Entity as RoomEntity;
