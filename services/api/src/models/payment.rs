//! Checkout link requests

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Body of `POST /api/mp/crear-pago`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutRequest {
    #[serde(rename = "titulo", deserialize_with = "lenient::text")]
    pub title: Option<String>,
    /// Number or numeric string
    #[serde(rename = "monto")]
    pub amount: Option<Value>,
    #[serde(rename = "vehiculoId", deserialize_with = "lenient::text")]
    pub vehicle_id: Option<String>,
}

/// A validated checkout request
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub title: String,
    pub amount: f64,
    /// Item id and external reference suffix, usually the vehicle id
    pub reference: Option<String>,
}

/// Hosted checkout returned to the site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLink {
    pub init_point: String,
    pub id: String,
}

impl CheckoutRequest {
    pub fn into_checkout(self) -> Result<Checkout, String> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "Title and amount are required".to_string())?;

        let amount = match &self.amount {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .ok_or_else(|| "Title and amount are required".to_string())?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err("Amount must be a positive number".to_string());
        }

        Ok(Checkout {
            title,
            amount,
            reference: self.vehicle_id.filter(|id| !id.trim().is_empty()),
        })
    }
}
