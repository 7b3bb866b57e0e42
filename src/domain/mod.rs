pub mod adapters;
pub mod models;
pub mod request;
pub mod snapshot;
