pub mod payment_dto;
pub mod providers;

pub use payment_dto::*;
pub use providers::*;
