//! # Rooms Service
//!
//! Paginated room listing on top of a generic list-query engine: clients
//! send page/limit plus JSON-encoded filters and sort orders, the engine
//! turns them into parameterized SQL, and every answer comes back in a
//! uniform result envelope.
//!
//! ## Architecture
//!
//! - **domain**: the query engine (filter catalog, sort translation,
//!   pagination, shaper), the `Room` entity and repository ports
//! - **application**: the result envelope and room use cases
//! - **infrastructure**: SeaORM executor, entities, migrations, repositories
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: lifecycle runtime shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::create_api_router;
