use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PaymentMethod {
    #[strum(to_string = "mpesa", serialize = "m-pesa", serialize = "m_pesa")]
    Mpesa,
    #[strum(to_string = "airtel_money", serialize = "airtel", serialize = "airtel-money")]
    AirtelMoney,
    Equitel,
    #[strum(to_string = "tkash", serialize = "t-kash")]
    Tkash,
    Card,
}

impl PaymentMethod {
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        PaymentMethod::from_str(input.trim())
            .map_err(|_| ApiError::BadRequest(format!("Unsupported payment method: {}", input)))
    }
}

/// Typed view of the gateway's numeric `status_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentState {
    Invalid,
    Completed,
    Failed,
    Reversed,
    Pending,
}

impl PaymentState {
    pub fn from_status_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => PaymentState::Invalid,
            Some(1) => PaymentState::Completed,
            Some(2) => PaymentState::Failed,
            Some(3) => PaymentState::Reversed,
            _ => PaymentState::Pending,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentState::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PesapalEnvironment {
    Sandbox,
    Live,
}

impl PesapalEnvironment {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            PesapalEnvironment::Sandbox => "https://cybqa.pesapal.com/pesapalv3",
            PesapalEnvironment::Live => "https://pay.pesapal.com/v3",
        }
    }
}
