use crate::models::entities::enum_types::PesapalEnvironment;
use eyre::{eyre, Report};
use secrecy::SecretString;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct PesapalInfo {
    pub pesapal_consumer_key: String,
    pub pesapal_consumer_secret: SecretString,
    pub pesapal_environment: PesapalEnvironment,
    pub pesapal_api_url: String,
    /// Pre-registered IPN id; registered at start-up when absent.
    pub pesapal_ipn_id: Option<String>,
    pub pesapal_pass_key: Option<SecretString>,
    pub pesapal_short_code: Option<String>,
    pub pesapal_currency: String,
    pub pesapal_country_code: String,
    pub pesapal_timeout_secs: u64,
}

impl PesapalInfo {
    pub fn new() -> Result<Self, Report> {
        let pesapal_environment = match env::var("PESAPAL_ENVIRONMENT") {
            Ok(value) => PesapalEnvironment::from_str(value.trim())
                .map_err(|_| eyre!("PESAPAL_ENVIRONMENT must be 'sandbox' or 'live'"))?,
            Err(_) => PesapalEnvironment::Sandbox,
        };

        Ok(Self {
            pesapal_consumer_key: env::var("PESAPAL_CONSUMER_KEY")
                .map_err(|_| eyre!("PESAPAL_CONSUMER_KEY must be set"))?,

            pesapal_consumer_secret: SecretString::new(
                env::var("PESAPAL_CONSUMER_SECRET")
                    .map_err(|_| eyre!("PESAPAL_CONSUMER_SECRET must be set"))?
                    .into(),
            ),

            pesapal_environment,

            pesapal_api_url: env::var("PESAPAL_BASE_URL")
                .unwrap_or_else(|_| pesapal_environment.default_base_url().into()),

            pesapal_ipn_id: non_empty_var("PESAPAL_IPN_ID"),

            pesapal_pass_key: non_empty_var("PESAPAL_PASS_KEY")
                .map(|key| SecretString::new(key.into())),

            pesapal_short_code: non_empty_var("PESAPAL_SHORT_CODE"),

            pesapal_currency: env::var("PESAPAL_CURRENCY").unwrap_or_else(|_| "KES".into()),

            pesapal_country_code: env::var("PESAPAL_COUNTRY_CODE")
                .unwrap_or_else(|_| "KE".into()),

            pesapal_timeout_secs: env::var("PESAPAL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .map_err(|e| eyre!("Invalid PESAPAL_TIMEOUT_SECS: {}", e))?,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
