use loanhub_primitives::error::{ApiError, PesapalError};
use loanhub_primitives::models::dtos::payment_dto::{AccessToken, SubmittedOrder};
use loanhub_primitives::models::dtos::providers::pesapal::{
    PesapalEnvelope, PesapalIpnRequest, PesapalIpnResponse, PesapalOrderRequest,
    PesapalOrderResponse, PesapalTokenRequest, PesapalTokenResponse, PesapalTransactionStatus,
};
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::{error, warn};

const TOKEN_PATH: &str = "api/Auth/RequestToken";
const SUBMIT_ORDER_PATH: &str = "api/Transactions/SubmitOrderRequest";
const TRANSACTION_STATUS_PATH: &str = "api/Transactions/GetTransactionStatus";
const REGISTER_IPN_PATH: &str = "api/URLSetup/RegisterIPN";

#[derive(Clone)]
pub struct PesapalClient {
    http: Client,
    base_url: Url,
    consumer_key: String,
    consumer_secret: SecretString,
}

impl PesapalClient {
    pub fn new(
        http: Client,
        base_url: &str,
        consumer_key: String,
        consumer_secret: SecretString,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid PesaPal base URL".into()))?;

        if base_url.cannot_be_a_base() {
            return Err(ApiError::Internal("Invalid PesaPal base URL".into()));
        }

        Ok(Self {
            http,
            base_url,
            consumer_key,
            consumer_secret,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn request_token(&self) -> Result<AccessToken, PesapalError> {
        let payload = PesapalTokenRequest {
            consumer_key: &self.consumer_key,
            consumer_secret: self.consumer_secret.expose_secret(),
        };

        let body: PesapalTokenResponse = self
            .execute(self.http.post(self.endpoint(TOKEN_PATH)).json(&payload), "request_token")
            .await
            .map_err(|e| PesapalError::Authentication(e.to_string()))?;

        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                warn!(message = ?body.message, "PesaPal issued no token");
                PesapalError::Authentication("Missing token".into())
            })?;

        Ok(AccessToken {
            token,
            expiry_date: body.expiry_date,
        })
    }

    pub async fn submit_order(
        &self,
        token: &str,
        order: &PesapalOrderRequest,
    ) -> Result<SubmittedOrder, PesapalError> {
        let body: PesapalOrderResponse = self
            .execute(
                self.http
                    .post(self.endpoint(SUBMIT_ORDER_PATH))
                    .bearer_auth(token)
                    .json(order),
                "submit_order",
            )
            .await?;

        let order_tracking_id = body
            .order_tracking_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PesapalError::InvalidResponse("Missing order_tracking_id".into()))?;

        let redirect_url = body
            .redirect_url
            .filter(|url| !url.is_empty())
            .ok_or_else(|| PesapalError::InvalidResponse("Missing redirect_url".into()))?;

        Ok(SubmittedOrder {
            order_tracking_id,
            merchant_reference: body
                .merchant_reference
                .unwrap_or_else(|| order.id.clone()),
            redirect_url,
        })
    }

    pub async fn transaction_status(
        &self,
        token: &str,
        order_tracking_id: &str,
    ) -> Result<PesapalTransactionStatus, PesapalError> {
        let mut url = self.endpoint(TRANSACTION_STATUS_PATH);
        url.query_pairs_mut()
            .append_pair("orderTrackingId", order_tracking_id);

        self.execute(self.http.get(url).bearer_auth(token), "transaction_status")
            .await
    }

    pub async fn register_ipn(&self, token: &str, ipn_url: &str) -> Result<String, PesapalError> {
        let payload = PesapalIpnRequest {
            url: ipn_url,
            ipn_notification_type: "GET",
        };

        let body: PesapalIpnResponse = self
            .execute(
                self.http
                    .post(self.endpoint(REGISTER_IPN_PATH))
                    .bearer_auth(token)
                    .json(&payload),
                "register_ipn",
            )
            .await?;

        body.ipn_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| PesapalError::InvalidResponse("Missing ipn_id".into()))
    }

    async fn execute<T>(&self, request: RequestBuilder, operation: &'static str) -> Result<T, PesapalError>
    where
        T: DeserializeOwned + PesapalEnvelope,
    {
        let resp = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                error!(operation, error = %e, "Failed to reach PesaPal");
                PesapalError::RequestFailed(e.to_string())
            })?;

        let status = resp.status();
        let body_text = resp.text().await.map_err(|e| {
            error!(operation, error = %e, "Failed to read PesaPal response");
            PesapalError::RequestFailed(e.to_string())
        })?;

        let body = match serde_json::from_str::<T>(&body_text) {
            Ok(body) => body,
            Err(e) if status.is_success() => {
                error!(
                    operation,
                    error = %e,
                    response = %body_text.chars().take(200).collect::<String>(),
                    "Invalid JSON from PesaPal"
                );
                return Err(PesapalError::InvalidResponse(e.to_string()));
            }
            Err(_) => {
                warn!(
                    operation,
                    http_status = status.as_u16(),
                    response = %body_text.chars().take(200).collect::<String>(),
                    "PesaPal request failed"
                );
                return Err(PesapalError::RequestFailed(format!("HTTP {}", status.as_u16())));
            }
        };

        if let Some(reason) = body.rejection() {
            warn!(
                operation,
                http_status = status.as_u16(),
                pesapal_message = %reason,
                "PesaPal rejected request"
            );
            return Err(PesapalError::Rejected(reason));
        }

        if !status.is_success() {
            warn!(
                operation,
                http_status = status.as_u16(),
                "PesaPal request failed"
            );
            return Err(PesapalError::RequestFailed(format!("HTTP {}", status.as_u16())));
        }

        Ok(body)
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(path.split('/'));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> PesapalClient {
        PesapalClient::new(
            Client::new(),
            base,
            "key".into(),
            SecretString::from("secret"),
        )
        .unwrap()
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let c = client("https://cybqa.pesapal.com/pesapalv3");
        assert_eq!(
            c.endpoint(TOKEN_PATH).as_str(),
            "https://cybqa.pesapal.com/pesapalv3/api/Auth/RequestToken"
        );

        let c = client("https://pay.pesapal.com/v3/");
        assert_eq!(
            c.endpoint(SUBMIT_ORDER_PATH).as_str(),
            "https://pay.pesapal.com/v3/api/Transactions/SubmitOrderRequest"
        );
    }

    #[test]
    fn endpoint_on_bare_host() {
        let c = client("http://127.0.0.1:9000");
        assert_eq!(
            c.endpoint(REGISTER_IPN_PATH).as_str(),
            "http://127.0.0.1:9000/api/URLSetup/RegisterIPN"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        assert!(PesapalClient::new(
            Client::new(),
            "not a url",
            "key".into(),
            SecretString::from("secret"),
        )
        .is_err());
    }
}
