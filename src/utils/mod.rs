pub mod async_helper;
pub mod avatar;
pub mod error_handling;
pub mod errors;
pub mod formatting;
pub mod http;
pub mod oauth;
pub mod token_store;

// Re-export commonly used types
pub use errors::AuthError;
