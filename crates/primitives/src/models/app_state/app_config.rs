use crate::models::app_state::pesapal_details::PesapalInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Public origin of the web front-end; callback redirects land here.
    pub site_base_url: String,

    pub pesapal_details: PesapalInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            site_base_url: env::var("SITE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into())
                .trim_end_matches('/')
                .to_string(),

            pesapal_details: PesapalInfo::new()?,
        })
    }

    /// URL the gateway calls back once an order changes state.
    pub fn callback_url(&self) -> String {
        format!("{}/api/loan-payment/callback", self.site_base_url)
    }
}
