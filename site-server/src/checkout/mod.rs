//! Checkout Orchestrator
//!
//! Strictly ordered, non-resumable flow:
//! validate -> price cart -> pay -> synthesize order -> clear cart ->
//! park the order for the confirmation view.
//!
//! There is no retry or resume. Any failure drops the whole attempt and
//! the customer resubmits from scratch; the cart is only cleared after
//! payment has succeeded.

mod handoff;

pub use handoff::OrderHandoff;

use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use shared::models::{
    CardDetails, CheckoutRequest, CustomerInfo, Order, PaymentDetails, PaymentMethod,
    PaymentRequest,
};
use shared::util::now_millis;
use tracing::info;

use crate::cart;
use crate::core::ServerState;
use crate::payment::{self, PaymentError};
use crate::utils::validation::validate_email_field;
use crate::utils::{AppError, AppResult};

/// Tables the host can seat a confirmed order at
const TABLE_RANGE: std::ops::RangeInclusive<i64> = 1..=50;

pub async fn run(state: &ServerState, request: CheckoutRequest) -> AppResult<Order> {
    // 1. Customer field validation, before anything touches the gateway
    if request.session_id.trim().is_empty() {
        return Err(AppError::validation("Session ID is required"));
    }
    if request.customer_name.trim().is_empty() {
        return Err(AppError::validation("Customer name is required"));
    }
    validate_email_field(&request.customer_email, "customerEmail")?;

    // 2. Price the live cart
    let lines = cart::list(&state.pool, Some(&request.session_id), None).await?;
    if lines.is_empty() {
        return Err(AppError::validation("Cart is empty"));
    }

    let subtotal = cart::total(&lines);
    let tax_rate = Decimal::from_f64(state.config.checkout_tax_rate).unwrap_or_default();
    let total = (subtotal * (Decimal::ONE + tax_rate)).round_dp(2);
    let total_amount = total.to_f64().unwrap_or(0.0);

    info!(
        target: "checkout",
        session_id = %request.session_id,
        lines = lines.len(),
        %subtotal,
        %total,
        "Checkout started"
    );

    // 3. Pay
    let payment_request = build_payment_request(&request, total_amount);
    let intent = payment::process(
        &payment_request,
        state.config.payment_failure_rate,
        state.config.payment_delay_ms,
    )
    .await
    .map_err(|e| match e {
        PaymentError::Declined => AppError::payment_declined(e.to_string()),
        other => AppError::validation(other.to_string()),
    })?;

    // 4. Synthesize the order
    let card_last4 = intent
        .payment_method
        .card
        .as_ref()
        .map(|c| c.last4.clone());
    let order = Order {
        id: format!("order_{}", now_millis()),
        items: lines,
        customer_info: payment_request.customer_info.clone(),
        payment_details: PaymentDetails {
            amount: total_amount,
            currency: "USD".to_string(),
            method: request.payment_method.clone(),
            card_last4,
            transaction_id: intent.id,
        },
        table_number: rand::thread_rng().gen_range(TABLE_RANGE),
        total_amount,
        status: "confirmed".to_string(),
        created_at: now_millis(),
        special_requests: request.special_requests.clone(),
    };

    // 5. Clear the cart only once payment is through
    cart::clear(&state.pool, Some(&request.session_id), None).await?;

    // 6. Park for the confirmation view
    state.handoff.put(&request.session_id, order.clone());

    info!(
        target: "checkout",
        order_id = %order.id,
        table = order.table_number,
        total = order.total_amount,
        "Checkout confirmed"
    );

    Ok(order)
}

fn build_payment_request(request: &CheckoutRequest, amount: f64) -> PaymentRequest {
    let card = if request.payment_method == "card" {
        Some(CardDetails {
            number: request.card_number.clone().unwrap_or_default(),
            expiry: request.expiry_date.clone().unwrap_or_default(),
            cvv: request.cvv.clone().unwrap_or_default(),
        })
    } else {
        None
    };

    PaymentRequest {
        amount,
        currency: "USD".to_string(),
        payment_method: PaymentMethod {
            method_type: request.payment_method.clone(),
            card,
        },
        customer_info: CustomerInfo {
            name: request.customer_name.trim().to_string(),
            email: request.customer_email.trim().to_lowercase(),
            phone: request.customer_phone.clone(),
        },
        metadata: Some(serde_json::json!({ "sessionId": request.session_id })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::email::EmailClient;
    use shared::models::{CartLineCreate, MealCreate};
    use std::sync::Arc;

    async fn test_state(failure_rate: f64) -> ServerState {
        let mut config = crate::core::Config::from_env();
        config.payment_failure_rate = failure_rate;
        config.payment_delay_ms = 0;
        let db = DbService::new_in_memory().await.unwrap();
        ServerState::new(
            config,
            db.pool,
            Arc::new(EmailClient::disabled()),
            Arc::new(OrderHandoff::new()),
        )
    }

    async fn seed_cart(state: &ServerState, session: &str, price: f64, quantity: i64) {
        let meal = crate::db::repository::meal::create(
            &state.pool,
            MealCreate {
                title: "Pasta".to_string(),
                description: "test".to_string(),
                price,
                child_price: None,
                image: "/img.jpg".to_string(),
                badge: None,
                meal_type: "dinner".to_string(),
                category: None,
                is_available: None,
            },
        )
        .await
        .unwrap();
        cart::add(
            &state.pool,
            CartLineCreate {
                session_id: session.to_string(),
                user_id: None,
                meal_id: meal.id,
                restaurant_id: None,
                date: None,
                quantity: Some(quantity),
                child_quantity: None,
            },
        )
        .await
        .unwrap();
    }

    fn checkout_request(session: &str) -> CheckoutRequest {
        CheckoutRequest {
            session_id: session.to_string(),
            customer_name: "Ada Lovelace".to_string(),
            customer_email: "Ada@Example.com".to_string(),
            customer_phone: None,
            payment_method: "card".to_string(),
            card_number: Some("4242424242424242".to_string()),
            expiry_date: Some("11/27".to_string()),
            cvv: Some("123".to_string()),
            special_requests: None,
        }
    }

    #[tokio::test]
    async fn successful_checkout_clears_cart_and_parks_order() {
        let state = test_state(0.0).await;
        seed_cart(&state, "s1", 25.0, 2).await;

        let order = run(&state, checkout_request("s1")).await.unwrap();
        assert!(order.id.starts_with("order_"));
        assert_eq!(order.status, "confirmed");
        assert!(TABLE_RANGE.contains(&order.table_number));
        // 50.00 subtotal + 8% tax
        assert_eq!(order.total_amount, 54.0);
        assert_eq!(order.customer_info.email, "ada@example.com");

        let remaining = cart::list(&state.pool, Some("s1"), None).await.unwrap();
        assert!(remaining.is_empty());

        assert!(state.handoff.take("s1").is_some());
        assert!(state.handoff.take("s1").is_none());
    }

    #[tokio::test]
    async fn declined_payment_leaves_cart_intact() {
        let state = test_state(1.0).await;
        seed_cart(&state, "s1", 25.0, 1).await;

        let err = run(&state, checkout_request("s1")).await.unwrap_err();
        assert!(matches!(err, AppError::PaymentDeclined(_)));

        let remaining = cart::list(&state.pool, Some("s1"), None).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(state.handoff.take("s1").is_none());
    }

    #[tokio::test]
    async fn empty_cart_fails_validation() {
        let state = test_state(0.0).await;
        let err = run(&state, checkout_request("s1")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn missing_name_fails_before_payment() {
        let state = test_state(0.0).await;
        seed_cart(&state, "s1", 25.0, 1).await;

        let mut req = checkout_request("s1");
        req.customer_name = " ".to_string();
        let err = run(&state, req).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        // nothing was cleared
        let remaining = cart::list(&state.pool, Some("s1"), None).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }
}
