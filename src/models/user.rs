use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Role stored on the user document. Documents written before the role
/// rollout have no `role` field at all, so the serde default must stay
/// `Student`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Instructor,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&Role::Instructor).unwrap(),
            "\"instructor\""
        );
    }

    #[test]
    fn missing_role_defaults_to_student() {
        let user: User =
            serde_json::from_str(r#"{"name": "Ana", "email": "ana@example.com"}"#).unwrap();
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn role_field_round_trips() {
        let user: User = serde_json::from_str(
            r#"{"name": "Ana", "email": "ana@example.com", "role": "admin"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
