pub mod errors;
pub mod kv;
pub mod observability;
pub mod routes;
pub mod startup;
pub mod state;

pub use startup::run_with_config;
