//! Server module wiring the invoice actions and pages into an axum router

pub mod builder;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::AppState;
pub use router::build_router;
