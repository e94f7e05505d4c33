pub mod animation;
pub mod cosmos_app;

pub use cosmos_app::CosmosApp;
