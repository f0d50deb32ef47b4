use serde::Deserialize;
use tracing::{info, warn};
use url::form_urlencoded;

pub const SUCCESS_PATH: &str = "/loan-payment/success";
pub const ERROR_PATH: &str = "/loan-payment/error";

#[derive(Debug, Deserialize)]
struct CallbackParams {
    #[serde(rename = "OrderTrackingId")]
    order_tracking_id: Option<String>,
    #[serde(rename = "OrderMerchantReference")]
    merchant_reference: Option<String>,
    #[serde(rename = "OrderNotificationType")]
    notification_type: Option<String>,
}

/// What a gateway callback resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Success {
        order_tracking_id: String,
        merchant_reference: String,
    },
    Failure {
        message: String,
    },
}

impl CallbackOutcome {
    /// Browser redirect target under `site_base_url`.
    pub fn redirect_url(&self, site_base_url: &str) -> String {
        let base = site_base_url.trim_end_matches('/');
        let mut query = form_urlencoded::Serializer::new(String::new());

        let path = match self {
            CallbackOutcome::Success {
                order_tracking_id,
                merchant_reference,
            } => {
                query
                    .append_pair("orderTrackingId", order_tracking_id)
                    .append_pair("merchantReference", merchant_reference);
                SUCCESS_PATH
            }
            CallbackOutcome::Failure { message } => {
                query.append_pair("error", message);
                ERROR_PATH
            }
        };

        format!("{}{}?{}", base, path, query.finish())
    }
}

pub struct CallbackService;

impl CallbackService {
    pub fn resolve(raw_query: Option<&str>) -> CallbackOutcome {
        let raw_query = match raw_query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(q) => q,
            None => return Self::failure("Missing callback parameters"),
        };

        let params: CallbackParams = match serde_urlencoded::from_str(raw_query) {
            Ok(params) => params,
            Err(e) => return Self::failure(&format!("Invalid callback parameters: {}", e)),
        };

        let order_tracking_id = match non_empty(params.order_tracking_id) {
            Some(id) => id,
            None => return Self::failure("Missing OrderTrackingId"),
        };

        let merchant_reference = match non_empty(params.merchant_reference) {
            Some(reference) => reference,
            None => return Self::failure("Missing OrderMerchantReference"),
        };

        info!(
            order_tracking_id = %order_tracking_id,
            merchant_reference = %merchant_reference,
            notification_type = ?params.notification_type,
            "PesaPal callback received"
        );

        CallbackOutcome::Success {
            order_tracking_id,
            merchant_reference,
        }
    }

    fn failure(message: &str) -> CallbackOutcome {
        warn!(reason = %message, "Rejected PesaPal callback");
        CallbackOutcome::Failure {
            message: message.to_string(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
