pub mod aggregator;
pub mod auth_service;
pub mod chart_registry;
pub mod currency_service;
pub mod renderer;
pub mod transaction_service;
