use crate::{database::MongoDB, models::Payment};
use futures::stream::StreamExt;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RecordPaymentRequest {
    pub email: String,
    pub transaction_id: String,
    pub price: f64,
    pub class_id: String,
    pub class_name: String,
    pub status: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecordPaymentResponse {
    pub success: bool,
    pub inserted_id: Option<String>,
}

// ==================== SERVICE FUNCTIONS ====================

/// Persist a completed payment as reported by the client. The payment
/// date is stamped server-side.
pub async fn record_payment(
    db: &MongoDB,
    request: RecordPaymentRequest,
) -> Result<RecordPaymentResponse, String> {
    let collection = db.collection::<Payment>("payments");

    let payment = Payment {
        id: None,
        email: request.email,
        transaction_id: request.transaction_id,
        price: request.price,
        class_id: request.class_id,
        class_name: request.class_name,
        date: Some(BsonDateTime::now()),
        status: request.status,
    };

    let result = collection
        .insert_one(&payment)
        .await
        .map_err(|e| format!("Failed to record payment: {}", e))?;

    log::info!(
        "Payment {} recorded for {}",
        payment.transaction_id,
        payment.email
    );

    Ok(RecordPaymentResponse {
        success: true,
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
    })
}

/// Full payment history, newest first.
pub async fn list_enrollments(db: &MongoDB) -> Result<Vec<Payment>, String> {
    let collection = db.collection::<Payment>("payments");

    let mut cursor = collection
        .find(doc! {})
        .sort(doc! { "date": -1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut payments = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(payment) => payments.push(payment),
            Err(e) => log::error!("Skipping unreadable payment document: {}", e),
        }
    }

    Ok(payments)
}
