pub mod error;
pub mod router;
pub mod server;
pub mod types;
pub mod handlers {
    pub mod brands;
    pub mod common;
    pub mod health;
    pub mod models;
}

pub use error::HttpError;
pub use router::{create_router, ApiDoc};
pub use server::{serve_with_grace, shutdown_signal};
pub use types::AppState;
