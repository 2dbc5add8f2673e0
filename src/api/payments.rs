use actix_web::{web, HttpResponse, Responder};

use crate::{
    database::MongoDB,
    models::Payment,
    services::{payment_service, stripe_service},
};

/// POST /create-payment-intent - Start a Stripe payment for a price
#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = stripe_service::CreatePaymentIntentRequest,
    responses(
        (status = 200, description = "Client secret for confirmation", body = stripe_service::CreatePaymentIntentResponse)
    )
)]
pub async fn create_payment_intent(
    request: web::Json<stripe_service::CreatePaymentIntentRequest>,
) -> impl Responder {
    match stripe_service::create_payment_intent(request.price).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error creating payment intent: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// POST /paymenthistory - Record a completed payment
#[utoipa::path(
    post,
    path = "/paymenthistory",
    tag = "Payments",
    request_body = payment_service::RecordPaymentRequest,
    responses(
        (status = 200, description = "Payment stored", body = payment_service::RecordPaymentResponse)
    )
)]
pub async fn record_payment(
    db: web::Data<MongoDB>,
    request: web::Json<payment_service::RecordPaymentRequest>,
) -> impl Responder {
    match payment_service::record_payment(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error recording payment: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /enrolledclass - All payment records, newest first
#[utoipa::path(
    get,
    path = "/enrolledclass",
    tag = "Payments",
    responses(
        (status = 200, description = "Payment records", body = [Payment])
    )
)]
pub async fn list_enrollments(db: web::Data<MongoDB>) -> impl Responder {
    match payment_service::list_enrollments(&db).await {
        Ok(payments) => HttpResponse::Ok().json(payments),
        Err(e) => {
            log::error!("Error listing enrollments: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
