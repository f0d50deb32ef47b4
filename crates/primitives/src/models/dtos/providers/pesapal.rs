use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct PesapalTokenRequest<'a> {
    pub consumer_key: &'a str,
    pub consumer_secret: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PesapalErrorBody {
    pub error_type: Option<String>,
    pub code: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PesapalTokenResponse {
    pub token: Option<String>,
    #[serde(rename = "expiryDate")]
    pub expiry_date: Option<String>,
    pub error: Option<PesapalErrorBody>,
    pub status: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PesapalBillingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub country_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PesapalOrderRequest {
    pub id: String,
    pub currency: String,
    pub amount: f64,
    pub description: String,
    pub callback_url: String,
    pub notification_id: String,
    pub billing_address: PesapalBillingAddress,
}

#[derive(Debug, Deserialize)]
pub struct PesapalOrderResponse {
    pub order_tracking_id: Option<String>,
    pub merchant_reference: Option<String>,
    pub redirect_url: Option<String>,
    pub error: Option<PesapalErrorBody>,
    pub status: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct PesapalTransactionStatus {
    pub payment_method: Option<String>,
    pub amount: Option<f64>,
    pub created_date: Option<String>,
    pub confirmation_code: Option<String>,
    pub payment_status_description: Option<String>,
    pub description: Option<String>,
    pub message: Option<String>,
    pub payment_account: Option<String>,
    pub call_back_url: Option<String>,
    pub status_code: Option<i64>,
    pub merchant_reference: Option<String>,
    pub currency: Option<String>,
    pub error: Option<PesapalErrorBody>,
    pub status: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct PesapalIpnRequest<'a> {
    pub url: &'a str,
    pub ipn_notification_type: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PesapalIpnResponse {
    pub ipn_id: Option<String>,
    pub url: Option<String>,
    pub error: Option<PesapalErrorBody>,
    pub status: Option<Value>,
}

/// Common error envelope carried by every PesaPal response body.
pub trait PesapalEnvelope {
    fn error_body(&self) -> Option<&PesapalErrorBody>;
    fn status_value(&self) -> Option<&Value>;

    /// The gateway's reason for refusing the request, if it did.
    fn rejection(&self) -> Option<String> {
        envelope_rejection(self.error_body(), self.status_value())
    }
}

fn envelope_rejection(error: Option<&PesapalErrorBody>, status: Option<&Value>) -> Option<String> {
    if let Some(err) = error {
        let code = match &err.code {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        let reason = [err.message.clone(), code, err.error_type.clone()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty());

        if reason.is_some() {
            return reason;
        }
    }

    match status {
        Some(Value::String(s)) if s != "200" => Some(format!("Gateway status {}", s)),
        Some(Value::Number(n)) if n.as_u64() != Some(200) => Some(format!("Gateway status {}", n)),
        _ => None,
    }
}

macro_rules! impl_envelope {
    ($($ty:ty),* $(,)?) => {
        $(
            impl PesapalEnvelope for $ty {
                fn error_body(&self) -> Option<&PesapalErrorBody> {
                    self.error.as_ref()
                }

                fn status_value(&self) -> Option<&Value> {
                    self.status.as_ref()
                }
            }
        )*
    };
}

impl_envelope!(PesapalTokenResponse, PesapalOrderResponse, PesapalIpnResponse);

impl PesapalTransactionStatus {
    /// Whether the body reports a payment state at all.
    pub fn has_payment_state(&self) -> bool {
        self.status_code.is_some()
            || self
                .payment_status_description
                .as_deref()
                .is_some_and(|d| !d.trim().is_empty())
    }
}

// Failed and reversed payments come back with an error object and a
// non-200 status next to the real state; only a stateless body is a refusal.
impl PesapalEnvelope for PesapalTransactionStatus {
    fn error_body(&self) -> Option<&PesapalErrorBody> {
        self.error.as_ref()
    }

    fn status_value(&self) -> Option<&Value> {
        self.status.as_ref()
    }

    fn rejection(&self) -> Option<String> {
        if self.has_payment_state() {
            return None;
        }
        envelope_rejection(self.error_body(), self.status_value())
    }
}
