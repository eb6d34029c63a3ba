//! News API: topics, articles, comments and users over PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod response;
pub mod routes;
pub mod schema;
pub mod seed;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use routes::{api_routes, app, app_with_layers, common_routes};
pub use schema::ensure_schema;
pub use seed::{seed, SeedData};
pub use state::AppState;
pub use store::{MemoryStore, NewsStore, PgStore};
