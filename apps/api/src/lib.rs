pub mod config;
pub mod errors;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::build_router;
pub use state::AppState;
