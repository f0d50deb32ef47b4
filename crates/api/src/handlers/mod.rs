pub mod create_payment_url;
pub mod health;
pub mod initiate_payment;
pub mod loan_payment_callback;
pub mod payment_status;
pub mod pesapal_token;
pub mod test_auth;
