use crate::{
    database::MongoDB,
    models::{Class, ClassStatus},
};
use futures::stream::StreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Document};
use serde::{Deserialize, Serialize};

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct CreateClassRequest {
    pub name: String,
    pub image: Option<String>,
    pub instructor_name: String,
    pub instructor_email: String,
    pub price: f64,
    pub available_seats: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreateClassResponse {
    pub success: bool,
    pub inserted_id: Option<String>,
}

/// Merged review update: status and feedback travel together so a single
/// PATCH covers both the approve/deny action and the feedback note.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ReviewClassRequest {
    pub status: Option<ClassStatus>,
    pub feedback: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ReviewClassResponse {
    pub success: bool,
    pub modified_count: u64,
}

// ==================== SERVICE FUNCTIONS ====================

async fn collect(mut cursor: mongodb::Cursor<Class>) -> Vec<Class> {
    let mut classes = Vec::new();
    while let Some(result) = cursor.next().await {
        match result {
            Ok(class) => classes.push(class),
            Err(e) => log::error!("Skipping unreadable class document: {}", e),
        }
    }
    classes
}

/// Public catalog: approved classes only, most enrolled first.
pub async fn list_approved(db: &MongoDB) -> Result<Vec<Class>, String> {
    let collection = db.collection::<Class>("classes");

    let cursor = collection
        .find(doc! { "class_status": "approved" })
        .sort(doc! { "enrolled_class": -1 })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(collect(cursor).await)
}

/// Admin view: every class regardless of review state.
pub async fn list_all(db: &MongoDB) -> Result<Vec<Class>, String> {
    let collection = db.collection::<Class>("classes");

    let cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(collect(cursor).await)
}

pub async fn list_by_instructor(db: &MongoDB, email: &str) -> Result<Vec<Class>, String> {
    let collection = db.collection::<Class>("classes");

    let cursor = collection
        .find(doc! { "instructor_email": email })
        .await
        .map_err(|e| format!("Database error: {}", e))?;

    Ok(collect(cursor).await)
}

/// New classes always enter review as pending with zero enrollment,
/// whatever the client sent.
pub async fn create_class(
    db: &MongoDB,
    request: CreateClassRequest,
) -> Result<CreateClassResponse, String> {
    let collection = db.collection::<Class>("classes");

    let new_class = Class {
        id: None,
        name: request.name,
        image: request.image,
        instructor_name: request.instructor_name,
        instructor_email: request.instructor_email,
        price: request.price,
        available_seats: request.available_seats,
        enrolled_class: 0,
        class_status: ClassStatus::Pending,
        feedback: None,
    };

    let result = collection
        .insert_one(&new_class)
        .await
        .map_err(|e| format!("Failed to create class: {}", e))?;

    log::info!("Class created by {}", new_class.instructor_email);

    Ok(CreateClassResponse {
        success: true,
        inserted_id: result.inserted_id.as_object_id().map(|id| id.to_hex()),
    })
}

/// Build the `$set` document for a review patch. Status and feedback are
/// one merged update; `None` means the patch carries neither.
fn review_update(request: &ReviewClassRequest) -> Option<Document> {
    let mut set = Document::new();
    if let Some(status) = &request.status {
        // ClassStatus serializes to a plain lowercase string
        set.insert("class_status", to_bson(status).ok()?);
    }
    if let Some(feedback) = &request.feedback {
        set.insert("feedback", feedback.as_str());
    }

    if set.is_empty() {
        None
    } else {
        Some(set)
    }
}

pub async fn review_class(
    db: &MongoDB,
    id: &str,
    request: ReviewClassRequest,
) -> Result<ReviewClassResponse, String> {
    let object_id = ObjectId::parse_str(id).map_err(|e| format!("Invalid class id: {}", e))?;

    let set = review_update(&request)
        .ok_or_else(|| "Nothing to update: provide status and/or feedback".to_string())?;

    let collection = db.collection::<Class>("classes");

    let result = collection
        .update_one(doc! { "_id": object_id }, doc! { "$set": set })
        .upsert(true)
        .await
        .map_err(|e| format!("Failed to update class: {}", e))?;

    log::info!("Class {} reviewed ({:?})", id, request.status);

    Ok(ReviewClassResponse {
        success: true,
        modified_count: result.modified_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn review_update_with_status_only() {
        let set = review_update(&ReviewClassRequest {
            status: Some(ClassStatus::Approved),
            feedback: None,
        })
        .unwrap();
        assert_eq!(set.get_str("class_status").unwrap(), "approved");
        assert_eq!(set.get("feedback"), None);
    }

    #[test]
    fn review_update_with_feedback_only() {
        let set = review_update(&ReviewClassRequest {
            status: None,
            feedback: Some("needs a syllabus".to_string()),
        })
        .unwrap();
        assert_eq!(set.get("class_status"), None);
        assert_eq!(set.get_str("feedback").unwrap(), "needs a syllabus");
    }

    #[test]
    fn review_update_merges_status_and_feedback() {
        let set = review_update(&ReviewClassRequest {
            status: Some(ClassStatus::Denied),
            feedback: Some("seat count too low".to_string()),
        })
        .unwrap();
        assert_eq!(
            set.get("class_status"),
            Some(&Bson::String("denied".to_string()))
        );
        assert_eq!(
            set.get("feedback"),
            Some(&Bson::String("seat count too low".to_string()))
        );
    }

    #[test]
    fn review_update_rejects_empty_patch() {
        let update = review_update(&ReviewClassRequest {
            status: None,
            feedback: None,
        });
        assert!(update.is_none());
    }
}
