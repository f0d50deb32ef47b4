pub mod callback_service;
pub mod payment_service;

pub use callback_service::{CallbackOutcome, CallbackService};
pub use payment_service::PaymentService;
