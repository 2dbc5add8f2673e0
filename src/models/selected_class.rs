use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A class a student picked before paying. Carries a denormalized
/// snapshot of the class so the cart renders without a second lookup;
/// referential integrity back to `classes` is advisory only.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct SelectedClass {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub user_email: String,
    pub class_id: String,
    pub class_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_email: Option<String>,
}
