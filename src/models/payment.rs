use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// A completed payment as reported by the client after Stripe
/// confirmation. No reconciliation against Stripe is performed.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Payment {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub email: String,
    pub transaction_id: String,
    pub price: f64,
    pub class_id: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub date: Option<BsonDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
