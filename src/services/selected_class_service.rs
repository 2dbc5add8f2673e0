use crate::{database::MongoDB, models::SelectedClass};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SelectClassRequest {
    pub user_email: String,
    pub class_id: String,
    pub class_name: String,
    pub image: Option<String>,
    pub price: f64,
    pub instructor_email: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SelectClassResponse {
    pub success: bool,
    pub inserted_id: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UnselectClassResponse {
    pub success: bool,
    pub deleted_count: u64,
}

// ==================== SERVICE FUNCTIONS ====================

pub async fn list_for_student(db: &MongoDB, email: &str) -> Result<Vec<SelectedClass>, String> {
    let collection = db.collection::<SelectedClass>("selected_classes");

    let mut cursor = collection
        .find(doc! { "user_email": email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    let mut selected = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(item) => selected.push(item),
            Err(e) => log::error!("Skipping unreadable selected class: {}", e),
        }
    }

    Ok(selected)
}

pub async fn select_class(
    db: &MongoDB,
    request: SelectClassRequest,
) -> Result<SelectClassResponse, String> {
    let collection = db.collection::<SelectedClass>("selected_classes");

    let selected = SelectedClass {
        id: None,
        user_email: request.user_email,
        class_id: request.class_id,
        class_name: request.class_name,
        image: request.image,
        price: request.price,
        instructor_email: request.instructor_email,
    };

    let result = collection
        .insert_one(&selected)
        .await
        .map_err(|e| format!("Failed to select class: {}", e))?;

    log::info!("Class {} selected by {}", selected.class_id, selected.user_email);

    Ok(SelectClassResponse {
        success: true,
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
    })
}

/// Delete exactly the one selection matching the id.
pub async fn unselect_class(db: &MongoDB, id: &str) -> Result<UnselectClassResponse, String> {
    let object_id = ObjectId::parse_str(id).map_err(|e| format!("Invalid selection id: {}", e))?;

    let collection = db.collection::<SelectedClass>("selected_classes");

    let result = collection
        .delete_one(doc! { "_id": object_id })
        .await
        .map_err(|e| format!("Failed to delete selection: {}", e))?;

    Ok(UnselectClassResponse {
        success: result.deleted_count > 0,
        deleted_count: result.deleted_count,
    })
}
