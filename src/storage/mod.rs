pub mod error;
pub mod rows;
pub mod schema;
pub mod seed;

pub use error::{constraint_violation, ConstraintViolation, RepositoryError};
pub use schema::{ensure_schema, table_exists};
pub use seed::{load_seed_data, seed_entries, SeedEntry, SeedReport};
