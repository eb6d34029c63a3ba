//! HTTP handlers: extract params and bodies, call the store, shape the response.

pub mod api;
pub mod articles;
pub mod comments;
pub mod topics;
pub mod users;
pub use api::*;
pub use articles::*;
pub use comments::*;
pub use topics::*;
pub use users::*;
