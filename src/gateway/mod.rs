//! Razorpay integration via REST API (no SDK dependency).

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::domain::errors::DomainError;
use crate::domain::ports::{GatewayIntent, PaymentGateway};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

/// Payment-intent client for Razorpay's Orders API. Constructed once at
/// startup from environment credentials and injected where needed.
pub struct RazorpayClient {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(base_url: impl Into<String>, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<GatewayIntent, DomainError> {
        let resp = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": currency,
                "receipt": receipt,
                "payment_capture": 1,
            }))
            .send()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        let status = resp.status();
        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DomainError::Gateway(e.to_string()))?;

        if !status.is_success() {
            return Err(DomainError::Gateway(format!(
                "order create failed ({status}): {body}"
            )));
        }

        let id = body["id"]
            .as_str()
            .ok_or_else(|| DomainError::Gateway(format!("missing order id in response: {body}")))?
            .to_string();

        Ok(GatewayIntent { id, raw: body })
    }
}

/// HMAC-SHA256 hex digest over `"{gateway_order_id}|{gateway_payment_id}"`.
/// This is the signature the gateway attaches to its payment callback.
pub fn compute_signature(gateway_order_id: &str, gateway_payment_id: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(format!("{gateway_order_id}|{gateway_payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Check a caller-supplied hex signature against the expected one.
/// Comparison happens in constant time via `Mac::verify_slice`.
pub fn verify_signature(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    secret: &str,
    supplied: &str,
) -> bool {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(format!("{gateway_order_id}|{gateway_payment_id}").as_bytes());
    let Ok(sig_bytes) = hex::decode(supplied) else {
        return false;
    };
    mac.verify_slice(&sig_bytes).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_webhook_secret";

    #[test]
    fn signature_is_deterministic() {
        let a = compute_signature("order_abc", "pay_123", SECRET);
        let b = compute_signature("order_abc", "pay_123", SECRET);
        assert_eq!(a, b);
    }

    #[test]
    fn signature_is_hex_encoded_sha256() {
        let sig = compute_signature("order_abc", "pay_123", SECRET);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn single_character_change_alters_signature() {
        let base = compute_signature("order_abc", "pay_123", SECRET);
        assert_ne!(base, compute_signature("order_abc", "pay_124", SECRET));
        assert_ne!(base, compute_signature("order_abd", "pay_123", SECRET));
        assert_ne!(base, compute_signature("order_abc", "pay_123", "other_secret"));
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let sig = compute_signature("order_abc", "pay_123", SECRET);
        assert!(verify_signature("order_abc", "pay_123", SECRET, &sig));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let mut sig = compute_signature("order_abc", "pay_123", SECRET);
        // Flip the last hex digit.
        let last = sig.pop().unwrap();
        sig.push(if last == '0' { '1' } else { '0' });
        assert!(!verify_signature("order_abc", "pay_123", SECRET, &sig));
    }

    #[test]
    fn verify_rejects_non_hex_signature() {
        assert!(!verify_signature("order_abc", "pay_123", SECRET, "not-hex!"));
        assert!(!verify_signature("order_abc", "pay_123", SECRET, ""));
    }
}
