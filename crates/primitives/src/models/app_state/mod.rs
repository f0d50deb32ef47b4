pub mod app_config;
pub mod pesapal_details;

pub use app_config::*;
pub use pesapal_details::*;
