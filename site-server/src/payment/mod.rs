//! Mock Payment Gateway
//!
//! Simulates a card processor: artificial latency, field validation,
//! and a configurable random decline rate. Nothing leaves the process.
//!
//! Validation order is fixed: amount first, then customer, then card,
//! and only then the decline roll. A zero-amount request is always
//! rejected before any randomness runs.

use rand::Rng;
use shared::models::{
    CardSummary, CustomerInfo, PaymentIntent, PaymentMethodSummary, PaymentRequest,
};
use shared::util::now_millis;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

pub const DECLINE_MESSAGE: &str =
    "Your card was declined. Please try again with a different payment method.";

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid payment amount")]
    InvalidAmount,

    #[error("Customer name and email are required")]
    MissingCustomer,

    #[error("{0}")]
    InvalidCard(String),

    #[error("{}", DECLINE_MESSAGE)]
    Declined,
}

/// Process a payment request against the mock gateway.
///
/// `failure_rate` is the decline probability in `[0, 1]`; `delay_ms`
/// is the simulated processor latency.
pub async fn process(
    request: &PaymentRequest,
    failure_rate: f64,
    delay_ms: u64,
) -> Result<PaymentIntent, PaymentError> {
    tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;

    if request.amount <= 0.0 {
        return Err(PaymentError::InvalidAmount);
    }

    let customer = &request.customer_info;
    if customer.name.trim().is_empty() || customer.email.trim().is_empty() {
        return Err(PaymentError::MissingCustomer);
    }

    let card = validate_card(request)?;

    // Decline roll happens last, after all deterministic checks
    if rand::thread_rng().gen_range(0.0..1.0) < failure_rate {
        info!(target: "payment", amount = request.amount, "Payment declined");
        return Err(PaymentError::Declined);
    }

    let intent = build_intent(request, card);
    info!(target: "payment", intent_id = %intent.id, amount = intent.amount, "Payment succeeded");
    Ok(intent)
}

/// Card-method requests must carry a plausible card; other methods
/// (paypal) skip card checks entirely.
fn validate_card(request: &PaymentRequest) -> Result<Option<CardSummary>, PaymentError> {
    if request.payment_method.method_type != "card" {
        return Ok(None);
    }

    let card = request
        .payment_method
        .card
        .as_ref()
        .ok_or_else(|| PaymentError::InvalidCard("Card details are required".to_string()))?;

    let digits: String = card.number.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() < 16 {
        return Err(PaymentError::InvalidCard("Invalid card number".to_string()));
    }
    if card.expiry.trim().is_empty() {
        return Err(PaymentError::InvalidCard("Expiry date is required".to_string()));
    }
    if card.cvv.trim().len() < 3 {
        return Err(PaymentError::InvalidCard("Invalid CVV".to_string()));
    }

    let last4 = digits[digits.len() - 4..].to_string();
    let (exp_month, exp_year) = split_expiry(&card.expiry);

    Ok(Some(CardSummary {
        brand: "visa".to_string(),
        last4,
        exp_month,
        exp_year,
    }))
}

/// "MM/YY" -> ("MM", "20YY"); malformed input degrades to empty fields
/// rather than failing a payment that already passed validation.
fn split_expiry(expiry: &str) -> (String, String) {
    match expiry.split_once('/') {
        Some((month, year)) => (month.trim().to_string(), format!("20{}", year.trim())),
        None => (String::new(), String::new()),
    }
}

fn build_intent(request: &PaymentRequest, card: Option<CardSummary>) -> PaymentIntent {
    let now = now_millis();
    let suffix: String = Uuid::new_v4().simple().to_string()[..9].to_string();

    PaymentIntent {
        id: format!("pi_{now}_{suffix}"),
        amount: (request.amount * 100.0).round() as i64,
        currency: request.currency.to_lowercase(),
        status: "succeeded".to_string(),
        created: now / 1000,
        customer: CustomerInfo {
            name: request.customer_info.name.clone(),
            email: request.customer_info.email.clone(),
            phone: request.customer_info.phone.clone(),
        },
        payment_method: PaymentMethodSummary {
            method_type: request.payment_method.method_type.clone(),
            card,
        },
        metadata: request.metadata.clone().unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{CardDetails, PaymentMethod};

    fn card_request(amount: f64) -> PaymentRequest {
        PaymentRequest {
            amount,
            currency: "USD".to_string(),
            payment_method: PaymentMethod {
                method_type: "card".to_string(),
                card: Some(CardDetails {
                    number: "4242 4242 4242 4242".to_string(),
                    expiry: "12/28".to_string(),
                    cvv: "123".to_string(),
                }),
            },
            customer_info: CustomerInfo {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            metadata: None,
        }
    }

    #[tokio::test]
    async fn succeeds_with_zero_failure_rate() {
        let intent = process(&card_request(27.0), 0.0, 0).await.unwrap();
        assert!(intent.id.starts_with("pi_"));
        assert_eq!(intent.amount, 2700);
        assert_eq!(intent.currency, "usd");
        assert_eq!(intent.status, "succeeded");
        let card = intent.payment_method.card.unwrap();
        assert_eq!(card.last4, "4242");
        assert_eq!(card.exp_month, "12");
        assert_eq!(card.exp_year, "2028");
    }

    #[tokio::test]
    async fn always_declines_at_full_failure_rate() {
        let err = process(&card_request(27.0), 1.0, 0).await.unwrap_err();
        assert!(matches!(err, PaymentError::Declined));
        assert_eq!(err.to_string(), DECLINE_MESSAGE);
    }

    #[tokio::test]
    async fn zero_amount_rejected_before_decline_roll() {
        // even at 100% decline rate the amount check must win
        let err = process(&card_request(0.0), 1.0, 0).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidAmount));
    }

    #[tokio::test]
    async fn short_card_number_is_invalid() {
        let mut req = card_request(10.0);
        if let Some(card) = req.payment_method.card.as_mut() {
            card.number = "4242".to_string();
        }
        let err = process(&req, 0.0, 0).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidCard(_)));
    }

    #[tokio::test]
    async fn missing_customer_is_rejected() {
        let mut req = card_request(10.0);
        req.customer_info.name = "  ".to_string();
        let err = process(&req, 0.0, 0).await.unwrap_err();
        assert!(matches!(err, PaymentError::MissingCustomer));
    }

    #[tokio::test]
    async fn paypal_skips_card_validation() {
        let mut req = card_request(10.0);
        req.payment_method = PaymentMethod {
            method_type: "paypal".to_string(),
            card: None,
        };
        let intent = process(&req, 0.0, 0).await.unwrap();
        assert!(intent.payment_method.card.is_none());
    }
}
