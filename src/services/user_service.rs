use crate::{
    database::MongoDB,
    models::{Role, User},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson};
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RegisterUserRequest {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RegisterUserResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inserted_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AssignRoleResponse {
    pub success: bool,
    pub modified_count: u64,
}

// ==================== SERVICE FUNCTIONS ====================

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, String> {
    let collection = db.collection::<User>("users");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut users = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(user) => users.push(user),
            Err(e) => log::error!("Skipping unreadable user document: {}", e),
        }
    }

    Ok(users)
}

/// Registration keeps email unique by checking first rather than relying
/// on a database constraint. A duplicate is a soft outcome, not an error.
pub async fn register_user(
    db: &MongoDB,
    request: RegisterUserRequest,
) -> Result<RegisterUserResponse, String> {
    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    if existing.is_some() {
        log::info!("Registration skipped, email already known: {}", request.email);
        return Ok(RegisterUserResponse {
            success: false,
            inserted_id: None,
            message: Some("user already exists".to_string()),
        });
    }

    let new_user = User {
        id: None,
        name: request.name,
        email: request.email.clone(),
        photo_url: request.photo_url,
        role: Role::Student,
    };

    let result = collection
        .insert_one(&new_user)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

    log::info!("User registered: {}", request.email);

    Ok(RegisterUserResponse {
        success: true,
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
        message: None,
    })
}

/// Point-in-time role lookup; a missing user reads as `Student`.
pub async fn find_role(db: &MongoDB, email: &str) -> Result<Role, String> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! { "email": email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(user.map(|u| u.role).unwrap_or_default())
}

pub async fn is_admin(db: &MongoDB, email: &str) -> Result<bool, String> {
    Ok(find_role(db, email).await? == Role::Admin)
}

/// Assign a role by document id. Upserts so a missing document is
/// created rather than silently ignored.
pub async fn assign_role(db: &MongoDB, id: &str, role: Role) -> Result<AssignRoleResponse, String> {
    let object_id = ObjectId::parse_str(id).map_err(|e| format!("Invalid user id: {}", e))?;

    let collection = db.collection::<User>("users");

    let update = doc! {
        "$set": { "role": to_bson(&role).map_err(|e| e.to_string())? }
    };

    let result = collection
        .update_one(doc! { "_id": object_id }, update)
        .upsert(true)
        .await
        .map_err(|e| format!("Failed to update role: {}", e))?;

    log::info!("Role {:?} assigned to user {}", role, id);

    Ok(AssignRoleResponse {
        success: true,
        modified_count: result.modified_count,
    })
}
