pub mod error;
pub mod http;
pub mod models;
pub mod notify;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
