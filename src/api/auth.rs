use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::services::token_service;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct IssueTokenRequest {
    pub email: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct IssueTokenResponse {
    pub token: String,
}

/// POST /jwt - Issue a one-hour bearer token for an email payload
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    request_body = IssueTokenRequest,
    responses(
        (status = 200, description = "Signed token", body = IssueTokenResponse)
    )
)]
pub async fn issue_jwt(request: web::Json<IssueTokenRequest>) -> impl Responder {
    match token_service::issue_token(&request.email) {
        Ok(token) => HttpResponse::Ok().json(IssueTokenResponse { token }),
        Err(e) => {
            log::error!("Error issuing token: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
