use serde::{Deserialize, Serialize};
use std::env;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreatePaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatePaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripePaymentIntent {
    client_secret: String,
}

/// Price in major units to Stripe minor units. Stripe rejects fractional
/// cents, so round once here.
pub fn amount_in_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Create a processor-side payment intent and hand the client secret back
/// for confirmation in the browser. No idempotency key, no webhooks.
pub async fn create_payment_intent(price: f64) -> Result<CreatePaymentIntentResponse, String> {
    let secret_key =
        env::var("STRIPE_SECRET_KEY").map_err(|_| "STRIPE_SECRET_KEY not found in environment")?;

    let amount = amount_in_cents(price);

    log::info!("Creating payment intent for {} cents", amount);

    let params = [
        ("amount", amount.to_string()),
        ("currency", "usd".to_string()),
        ("payment_method_types[]", "card".to_string()),
    ];

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{}/payment_intents", STRIPE_API_BASE))
        .bearer_auth(&secret_key)
        .form(&params)
        .timeout(std::time::Duration::from_secs(10))
        .send()
        .await
        .map_err(|e| format!("Failed to reach Stripe: {}", e))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(format!("Stripe API error {}: {}", status, body));
    }

    let intent: StripePaymentIntent = response
        .json()
        .await
        .map_err(|e| format!("Failed to parse Stripe response: {}", e))?;

    log::info!("Payment intent created");

    Ok(CreatePaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_price_to_minor_units() {
        assert_eq!(amount_in_cents(10.0), 1000);
        assert_eq!(amount_in_cents(49.99), 4999);
        assert_eq!(amount_in_cents(0.0), 0);
    }

    #[test]
    fn rounds_fractional_cents() {
        assert_eq!(amount_in_cents(10.005), 1001);
        assert_eq!(amount_in_cents(10.004), 1000);
    }
}
