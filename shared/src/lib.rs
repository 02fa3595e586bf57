pub mod aggregation;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
