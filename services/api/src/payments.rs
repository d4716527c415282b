//! Hosted checkout links through Mercado Pago Checkout Pro

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::models::{Checkout, CheckoutLink};

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment provider is not configured")]
    NotConfigured,

    #[error("Payment provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Payment provider rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

pub type PaymentResult<T> = Result<T, PaymentError>;

/// Creates a hosted checkout for a single installment
#[async_trait]
pub trait PaymentLinkIssuer: Send + Sync {
    async fn create_checkout(&self, checkout: &Checkout) -> PaymentResult<CheckoutLink>;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentsConfig {
    /// Mercado Pago access token. Empty disables checkout creation.
    pub access_token: String,
    pub api_base_url: String,
    pub success_url: String,
    pub failure_url: String,
    pub pending_url: String,
    pub statement_descriptor: String,
    /// Prepended to the item title, e.g. `GoldPlan - Cuota 1: <title>`
    pub title_prefix: String,
    pub currency: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            api_base_url: "https://api.mercadopago.com".to_string(),
            success_url: "https://goldplan.com.ar/?pago=ok".to_string(),
            failure_url: "https://goldplan.com.ar/?pago=error".to_string(),
            pending_url: "https://goldplan.com.ar/?pago=pendiente".to_string(),
            statement_descriptor: "GOLDPLAN".to_string(),
            title_prefix: "GoldPlan - Cuota 1".to_string(),
            currency: "ARS".to_string(),
        }
    }
}

/// Checkout Pro preference for one installment.
///
/// Without a reference the item id falls back to `cuota-1` and the external
/// reference to the creation time in epoch milliseconds.
pub fn preference_body(config: &PaymentsConfig, checkout: &Checkout, now_millis: i64) -> Value {
    let reference = checkout
        .reference
        .clone()
        .unwrap_or_else(|| now_millis.to_string());

    json!({
        "items": [{
            "id": checkout.reference.as_deref().unwrap_or("cuota-1"),
            "title": format!("{}: {}", config.title_prefix, checkout.title),
            "quantity": 1,
            "unit_price": checkout.amount,
            "currency_id": config.currency,
        }],
        "back_urls": {
            "success": config.success_url,
            "failure": config.failure_url,
            "pending": config.pending_url,
        },
        "auto_return": "approved",
        "statement_descriptor": config.statement_descriptor,
        "external_reference": format!("cuota1-{}", reference),
    })
}

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    id: String,
    init_point: String,
}

pub struct MercadoPagoClient {
    http: reqwest::Client,
    config: PaymentsConfig,
}

impl MercadoPagoClient {
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.config.access_token.is_empty()
    }
}

#[async_trait]
impl PaymentLinkIssuer for MercadoPagoClient {
    async fn create_checkout(&self, checkout: &Checkout) -> PaymentResult<CheckoutLink> {
        if !self.is_configured() {
            return Err(PaymentError::NotConfigured);
        }

        let body = preference_body(&self.config, checkout, Utc::now().timestamp_millis());
        let url = format!(
            "{}/checkout/preferences",
            self.config.api_base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Mercado Pago answered {}: {}", status, body);
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let preference: PreferenceResponse = response.json().await?;
        info!("Created checkout preference {}", preference.id);

        Ok(CheckoutLink {
            init_point: preference.init_point,
            id: preference.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkout(reference: Option<&str>) -> Checkout {
        Checkout {
            title: "Fiat Cronos".to_string(),
            amount: 422627.0,
            reference: reference.map(str::to_string),
        }
    }

    #[test]
    fn test_preference_body_shape() {
        let body = preference_body(&PaymentsConfig::default(), &checkout(Some("12")), 0);

        assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
        let item = &body["items"][0];
        assert_eq!(item["id"], "12");
        assert_eq!(item["title"], "GoldPlan - Cuota 1: Fiat Cronos");
        assert_eq!(item["quantity"], 1);
        assert_eq!(item["unit_price"], 422627.0);
        assert_eq!(item["currency_id"], "ARS");
        assert_eq!(body["back_urls"]["success"], "https://goldplan.com.ar/?pago=ok");
        assert_eq!(body["back_urls"]["failure"], "https://goldplan.com.ar/?pago=error");
        assert_eq!(body["back_urls"]["pending"], "https://goldplan.com.ar/?pago=pendiente");
        assert_eq!(body["auto_return"], "approved");
        assert_eq!(body["statement_descriptor"], "GOLDPLAN");
        assert_eq!(body["external_reference"], "cuota1-12");
    }

    #[test]
    fn test_preference_without_reference() {
        let body = preference_body(&PaymentsConfig::default(), &checkout(None), 1_700_000_000_000);

        assert_eq!(body["items"][0]["id"], "cuota-1");
        assert_eq!(body["external_reference"], "cuota1-1700000000000");
    }

    #[tokio::test]
    async fn test_unconfigured_client_refuses() {
        let client = MercadoPagoClient::new(PaymentsConfig::default());

        assert!(!client.is_configured());
        assert!(matches!(
            client.create_checkout(&checkout(None)).await,
            Err(PaymentError::NotConfigured)
        ));
    }
}
