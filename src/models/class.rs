use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Review state of a class. New classes start as `Pending`; an admin
/// later moves them to `Approved` or `Denied`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ClassStatus {
    #[default]
    Pending,
    Approved,
    Denied,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct Class {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
    /// Number of students enrolled so far, kept as a plain counter.
    #[serde(default)]
    pub enrolled_class: i32,
    #[serde(default)]
    pub class_status: ClassStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ClassStatus::Approved).unwrap(),
            "\"approved\""
        );
        assert_eq!(
            serde_json::to_string(&ClassStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn new_class_defaults() {
        let class: Class = serde_json::from_str(
            r#"{
                "name": "Spanish 101",
                "instructor_name": "Ana",
                "instructor_email": "ana@example.com",
                "price": 49.5,
                "available_seats": 20
            }"#,
        )
        .unwrap();
        assert_eq!(class.class_status, ClassStatus::Pending);
        assert_eq!(class.enrolled_class, 0);
        assert!(class.feedback.is_none());
    }
}
