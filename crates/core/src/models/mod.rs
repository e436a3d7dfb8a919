pub mod analytics;
pub mod chart;
pub mod forms;
pub mod notification;
pub mod route;
pub mod settings;
pub mod snapshot;
pub mod transaction;
pub mod user;
pub mod view;
