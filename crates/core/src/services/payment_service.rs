pub use crate::app_state::AppState;
use loanhub_primitives::error::{ApiError, PesapalError};
use loanhub_primitives::models::dtos::payment_dto::{
    AccessToken, CreatePaymentUrlRequest, InitiatePaymentRequest, PaymentStatusResponse,
    StkPushRequest, SubmissionOutcome, TestAuthResponse,
};
use loanhub_primitives::models::dtos::providers::pesapal::{
    PesapalBillingAddress, PesapalOrderRequest,
};
use loanhub_primitives::models::enum_types::{PaymentMethod, PaymentState};
use loanhub_primitives::utility::normalize_phone_number;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

const MAX_DESCRIPTION_LEN: usize = 100;
const DEFAULT_DESCRIPTION: &str = "LoanHub Kenya payment";

pub struct PaymentService;

impl PaymentService {
    /// Fetches a fresh gateway token. Tokens are never cached.
    pub async fn get_access_token(state: &AppState) -> Result<AccessToken, ApiError> {
        state.pesapal.request_token().await.map_err(|e| {
            error!(error = %e, "Failed to obtain PesaPal access token");
            ApiError::from(e)
        })
    }

    pub async fn initiate_stk_push(
        state: &AppState,
        req: InitiatePaymentRequest,
    ) -> Result<SubmissionOutcome, ApiError> {
        let payment = Self::prepare_stk_push(req)?;

        info!(
            merchant_reference = %payment.merchant_reference,
            payment_method = %payment.payment_method,
            loan_id = ?payment.loan_id,
            user_id = ?payment.user_id,
            "Initiating STK push"
        );

        let order = PesapalOrderRequest {
            id: payment.merchant_reference.clone(),
            currency: state.config.pesapal_details.pesapal_currency.clone(),
            amount: payment.amount,
            description: payment.description.clone(),
            callback_url: state.config.callback_url(),
            notification_id: String::new(),
            billing_address: PesapalBillingAddress {
                email_address: None,
                phone_number: Some(payment.phone_number.clone()),
                country_code: state.config.pesapal_details.pesapal_country_code.clone(),
                first_name: None,
                last_name: None,
            },
        };

        Self::submit_order(state, order).await
    }

    /// Validates an initiation request and turns it into a submittable payment.
    pub fn prepare_stk_push(req: InitiatePaymentRequest) -> Result<StkPushRequest, ApiError> {
        req.validate().map_err(|e| {
            warn!(errors = %e, "Rejected payment initiation");
            ApiError::Validation(e)
        })?;

        let amount = req
            .amount
            .ok_or_else(|| ApiError::BadRequest("Amount is required".into()))?;
        let phone_number = req
            .phone_number
            .as_deref()
            .map(normalize_phone_number)
            .transpose()?
            .ok_or_else(|| ApiError::BadRequest("Phone number is required".into()))?;
        let payment_method = req
            .payment_method
            .as_deref()
            .map(PaymentMethod::parse)
            .transpose()?
            .ok_or_else(|| ApiError::BadRequest("Payment method is required".into()))?;

        if let Some(previous) = req.order_tracking_id.as_deref().filter(|id| !id.is_empty()) {
            info!(previous_order_tracking_id = %previous, "Re-initiating payment");
        }

        let description = req
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| match &req.loan_id {
                Some(loan_id) => format!("Loan repayment {}", loan_id),
                None => DEFAULT_DESCRIPTION.to_string(),
            });

        Ok(StkPushRequest {
            merchant_reference: merchant_reference(req.payment_id),
            amount,
            phone_number,
            payment_method,
            description: truncate(&description, MAX_DESCRIPTION_LEN),
            loan_id: req.loan_id,
            user_id: req.user_id,
        })
    }

    pub async fn create_payment_url(
        state: &AppState,
        req: CreatePaymentUrlRequest,
    ) -> Result<SubmissionOutcome, ApiError> {
        req.validate().map_err(|e| {
            warn!(errors = %e, "Rejected payment URL request");
            ApiError::Validation(e)
        })?;

        let amount = req
            .amount
            .ok_or_else(|| ApiError::BadRequest("Amount is required".into()))?;

        let phone_number = req
            .phone_number
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(normalize_phone_number)
            .transpose()?;
        let email = req.email.filter(|e| !e.trim().is_empty());

        if phone_number.is_none() && email.is_none() {
            return Err(ApiError::BadRequest(
                "Either phoneNumber or email is required".into(),
            ));
        }

        let pesapal = &state.config.pesapal_details;
        let order = PesapalOrderRequest {
            id: merchant_reference(req.id),
            currency: req
                .currency
                .map(|c| c.to_uppercase())
                .unwrap_or_else(|| pesapal.pesapal_currency.clone()),
            amount,
            description: truncate(
                req.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION),
                MAX_DESCRIPTION_LEN,
            ),
            callback_url: req.callback_url.unwrap_or_else(|| state.config.callback_url()),
            notification_id: String::new(),
            billing_address: PesapalBillingAddress {
                email_address: email,
                phone_number,
                country_code: pesapal.pesapal_country_code.clone(),
                first_name: req.first_name,
                last_name: req.last_name,
            },
        };

        Self::submit_order(state, order).await
    }

    /// Submits an order; a gateway refusal is a `Declined` outcome, not an error.
    async fn submit_order(
        state: &AppState,
        mut order: PesapalOrderRequest,
    ) -> Result<SubmissionOutcome, ApiError> {
        let token = Self::get_access_token(state).await?;
        order.notification_id = Self::notification_id(state, &token).await?;

        match state.pesapal.submit_order(&token.token, &order).await {
            Ok(submitted) => {
                info!(
                    order_tracking_id = %submitted.order_tracking_id,
                    merchant_reference = %submitted.merchant_reference,
                    "PesaPal order submitted"
                );
                Ok(SubmissionOutcome::Submitted(submitted))
            }
            Err(PesapalError::Rejected(reason)) => {
                warn!(merchant_reference = %order.id, reason = %reason, "PesaPal declined order");
                Ok(SubmissionOutcome::Declined { error: reason })
            }
            Err(e) => {
                error!(merchant_reference = %order.id, error = %e, "PesaPal order submission failed");
                Err(e.into())
            }
        }
    }

    pub async fn check_payment_status(
        state: &AppState,
        order_tracking_id: Option<&str>,
    ) -> Result<PaymentStatusResponse, ApiError> {
        let order_tracking_id = order_tracking_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::BadRequest("orderTrackingId is required".into()))?;

        let token = Self::get_access_token(state).await?;

        let status = state
            .pesapal
            .transaction_status(&token.token, order_tracking_id)
            .await
            .map_err(|e| {
                error!(order_tracking_id, error = %e, "PesaPal status query failed");
                ApiError::from(e)
            })?;

        let state_view = PaymentState::from_status_code(status.status_code);

        info!(
            order_tracking_id,
            payment_state = %state_view,
            terminal = state_view.is_terminal(),
            "PesaPal status retrieved"
        );

        Ok(PaymentStatusResponse {
            success: true,
            order_tracking_id: order_tracking_id.to_string(),
            status: status
                .payment_status_description
                .unwrap_or_else(|| "UNKNOWN".to_string()),
            state: state_view,
            status_code: status.status_code,
            payment_method: status.payment_method,
            amount: status.amount,
            currency: status.currency,
            confirmation_code: status.confirmation_code,
            merchant_reference: status.merchant_reference,
        })
    }

    /// Registers the callback URL as a GET IPN and returns its id.
    pub async fn register_ipn(state: &AppState) -> Result<String, ApiError> {
        let token = Self::get_access_token(state).await?;
        Self::register_ipn_with(state, &token).await
    }

    async fn register_ipn_with(state: &AppState, token: &AccessToken) -> Result<String, ApiError> {
        let callback_url = state.config.callback_url();

        let ipn_id = state
            .pesapal
            .register_ipn(&token.token, &callback_url)
            .await
            .map_err(|e| {
                error!(url = %callback_url, error = %e, "PesaPal IPN registration failed");
                ApiError::from(e)
            })?;

        info!(ipn_id = %ipn_id, url = %callback_url, "PesaPal IPN registered");
        Ok(state.remember_ipn_id(ipn_id).to_string())
    }

    async fn notification_id(state: &AppState, token: &AccessToken) -> Result<String, ApiError> {
        match state.ipn_id() {
            Some(id) => Ok(id.to_string()),
            None => Self::register_ipn_with(state, token).await,
        }
    }

    pub async fn test_authentication(state: &AppState) -> Result<TestAuthResponse, ApiError> {
        let pesapal = &state.config.pesapal_details;

        let token = state.pesapal.request_token().await.map_err(|e| {
            error!(error = %e, "PesaPal authentication check failed");
            ApiError::Auth("Authentication with PesaPal failed".into())
        })?;

        Ok(TestAuthResponse {
            success: true,
            message: "PesaPal authentication successful".to_string(),
            service: "PesaPal".to_string(),
            environment: pesapal.pesapal_environment.to_string(),
            base_url: state.pesapal.base_url().to_string(),
            token_issued: !token.token.is_empty(),
            token_expiry: token.expiry_date,
            short_code: pesapal.pesapal_short_code.clone(),
            pass_key_configured: pesapal.pesapal_pass_key.is_some(),
        })
    }
}

fn merchant_reference(requested: Option<String>) -> String {
    requested
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
