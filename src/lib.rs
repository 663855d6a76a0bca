pub mod config;
pub mod errors;
pub mod search;
pub mod store;
pub mod web;

pub use config::AppConfig;
pub use errors::SearchError;
pub use web::start_web_server;
