pub mod pesapal;

pub use pesapal::PesapalClient;
