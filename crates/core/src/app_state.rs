use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

use crate::clients::PesapalClient;
use eyre::Result;
use once_cell::sync::OnceCell;
pub use loanhub_primitives::models::app_config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pesapal: PesapalClient,
    registered_ipn_id: OnceCell<String>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.pesapal_details.pesapal_timeout_secs))
            .build()?;

        let pesapal = PesapalClient::new(
            http,
            &config.pesapal_details.pesapal_api_url,
            config.pesapal_details.pesapal_consumer_key.clone(),
            config.pesapal_details.pesapal_consumer_secret.clone(),
        )?;

        Ok(Arc::new(Self {
            config,
            pesapal,
            registered_ipn_id: OnceCell::new(),
        }))
    }

    /// Configured IPN id, else the one registered during this process.
    pub fn ipn_id(&self) -> Option<&str> {
        self.config
            .pesapal_details
            .pesapal_ipn_id
            .as_deref()
            .or_else(|| self.registered_ipn_id.get().map(String::as_str))
    }

    /// Keeps the first registered id; later ones are dropped.
    pub fn remember_ipn_id(&self, ipn_id: String) -> &str {
        self.registered_ipn_id.get_or_init(|| ipn_id)
    }
}
