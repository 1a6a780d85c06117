//! Room domain entity

use chrono::{DateTime, Utc};

/// A bookable room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    /// Display name, at most 100 characters
    pub name: String,
    /// Number of people the room seats
    pub capacity: i32,
    /// Owner
    pub user_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker; deleted rooms never appear in listings
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Room {
    /// Columns clients may filter and sort on.
    pub const QUERYABLE_FIELDS: &'static [&'static str] = &[
        "id",
        "name",
        "capacity",
        "user_id",
        "created_at",
        "updated_at",
    ];
}
