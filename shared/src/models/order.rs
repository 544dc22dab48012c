//! Order and Payment Types
//!
//! Orders are ephemeral: synthesized at checkout, handed to the
//! confirmation view through the read-once handoff store, never persisted.

use serde::{Deserialize, Serialize};

use super::CartLineWithMeal;

// =============================================================================
// Payment gateway wire types (mock Stripe shape)
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDetails {
    pub number: String,
    /// MM/YY
    pub expiry: String,
    pub cvv: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// card | paypal
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Payment request carried to the mock gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: f64,
    pub currency: String,
    pub payment_method: PaymentMethod,
    pub customer_info: CustomerInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Masked card summary echoed back on success
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSummary {
    pub brand: String,
    pub last4: String,
    pub exp_month: String,
    pub exp_year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentMethodSummary {
    #[serde(rename = "type")]
    pub method_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardSummary>,
}

/// Successful payment result
///
/// `amount` is in cents, `created` in unix seconds, mirroring the
/// provider shape the site was originally written against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created: i64,
    pub customer: CustomerInfo,
    pub payment_method: PaymentMethodSummary,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

// =============================================================================
// Checkout / Order
// =============================================================================

/// Checkout submission: customer fields plus the (masked) payment form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub session_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    /// card | paypal
    pub payment_method: String,
    pub card_number: Option<String>,
    pub expiry_date: Option<String>,
    pub cvv: Option<String>,
    pub special_requests: Option<String>,
}

/// Payment details as embedded into the confirmed order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub amount: f64,
    pub currency: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_last4: Option<String>,
    pub transaction_id: String,
}

/// Confirmed order, consumed exactly once by the confirmation view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<CartLineWithMeal>,
    pub customer_info: CustomerInfo,
    pub payment_details: PaymentDetails,
    pub table_number: i64,
    pub total_amount: f64,
    pub status: String,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}
