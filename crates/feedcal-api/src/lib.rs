pub mod app;
pub mod cli;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

pub use app::router;
pub use state::AppState;
