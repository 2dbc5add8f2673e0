use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    database::MongoDB,
    models::SelectedClass,
    services::selected_class_service,
};

#[derive(Debug, Deserialize)]
pub struct StudentQuery {
    pub email: String,
}

/// GET /select-class - Selected classes for a student
#[utoipa::path(
    get,
    path = "/select-class",
    tag = "SelectedClasses",
    params(("email" = String, Query, description = "Student email")),
    responses(
        (status = 200, description = "Selections for the student", body = [SelectedClass])
    )
)]
pub async fn list_selected_classes(
    db: web::Data<MongoDB>,
    query: web::Query<StudentQuery>,
) -> impl Responder {
    match selected_class_service::list_for_student(&db, &query.email).await {
        Ok(selected) => HttpResponse::Ok().json(selected),
        Err(e) => {
            log::error!("Error listing selected classes: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// POST /select-class - Add a class to a student's selection
#[utoipa::path(
    post,
    path = "/select-class",
    tag = "SelectedClasses",
    request_body = selected_class_service::SelectClassRequest,
    responses(
        (status = 200, description = "Selection stored", body = selected_class_service::SelectClassResponse)
    )
)]
pub async fn select_class(
    db: web::Data<MongoDB>,
    request: web::Json<selected_class_service::SelectClassRequest>,
) -> impl Responder {
    match selected_class_service::select_class(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error selecting class: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// DELETE /select-class/{id} - Remove one selection by id
#[utoipa::path(
    delete,
    path = "/select-class/{id}",
    tag = "SelectedClasses",
    params(("id" = String, Path, description = "Selection document id")),
    responses(
        (status = 200, description = "Selection removed", body = selected_class_service::UnselectClassResponse),
        (status = 400, description = "Invalid selection id")
    )
)]
pub async fn unselect_class(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    if mongodb::bson::oid::ObjectId::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Invalid selection ID"
        }));
    }

    match selected_class_service::unselect_class(&db, &id).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error deleting selection {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
