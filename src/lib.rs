pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::bootstrap::{bootstrap, initialize};
pub use app::catalog_service::CatalogService;
pub use domain::{Brand, Model, NewBrand, NewModel, PriceRange, PriceUpdate};
pub use infra::config::AppConfig;
pub use storage::{RepositoryError, SeedReport};
