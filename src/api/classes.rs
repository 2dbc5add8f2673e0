use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::{
    database::MongoDB,
    models::Class,
    services::{class_service, token_service::Claims},
};

#[derive(Debug, Deserialize)]
pub struct InstructorQuery {
    pub email: String,
}

/// GET /classes - Approved classes, most enrolled first
#[utoipa::path(
    get,
    path = "/classes",
    tag = "Classes",
    responses(
        (status = 200, description = "Approved classes sorted by enrollment", body = [Class])
    )
)]
pub async fn list_approved_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::list_approved(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => {
            log::error!("Error listing classes: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /allclasses - Every class regardless of review state (admin only)
#[utoipa::path(
    get,
    path = "/allclasses",
    tag = "Classes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All classes", body = [Class]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an admin")
    )
)]
pub async fn list_all_classes(db: web::Data<MongoDB>) -> impl Responder {
    match class_service::list_all(&db).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => {
            log::error!("Error listing all classes: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /my-class - Classes belonging to the calling instructor
#[utoipa::path(
    get,
    path = "/my-class",
    tag = "Classes",
    security(("bearer_auth" = [])),
    params(("email" = String, Query, description = "Instructor email, must match the token")),
    responses(
        (status = 200, description = "Classes for the instructor", body = [Class]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Query email does not match the token")
    )
)]
pub async fn my_classes(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    query: web::Query<InstructorQuery>,
) -> impl Responder {
    // The token decides whose classes you may read.
    if user.email != query.email {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": true,
            "message": "forbidden access"
        }));
    }

    match class_service::list_by_instructor(&db, &query.email).await {
        Ok(classes) => HttpResponse::Ok().json(classes),
        Err(e) => {
            log::error!("Error listing instructor classes: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// POST /classes - Create a class, entering review as pending
#[utoipa::path(
    post,
    path = "/classes",
    tag = "Classes",
    security(("bearer_auth" = [])),
    request_body = class_service::CreateClassRequest,
    responses(
        (status = 200, description = "Class created", body = class_service::CreateClassResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn create_class(
    db: web::Data<MongoDB>,
    request: web::Json<class_service::CreateClassRequest>,
) -> impl Responder {
    match class_service::create_class(&db, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error creating class: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /classes/{id} - Update review status and/or feedback
#[utoipa::path(
    patch,
    path = "/classes/{id}",
    tag = "Classes",
    params(("id" = String, Path, description = "Class document id")),
    request_body = class_service::ReviewClassRequest,
    responses(
        (status = 200, description = "Class updated", body = class_service::ReviewClassResponse),
        (status = 400, description = "Invalid class id")
    )
)]
pub async fn review_class(
    db: web::Data<MongoDB>,
    path: web::Path<String>,
    request: web::Json<class_service::ReviewClassRequest>,
) -> impl Responder {
    let id = path.into_inner();

    if mongodb::bson::oid::ObjectId::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Invalid class ID"
        }));
    }

    // An empty patch is a client mistake, not a server failure.
    if request.status.is_none() && request.feedback.is_none() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Nothing to update: provide status and/or feedback"
        }));
    }

    match class_service::review_class(&db, &id, request.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error reviewing class {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    // Lazy client: no connection is made until a query runs, and the
    // empty-patch guard returns before any query.
    async fn disconnected_db() -> MongoDB {
        let options = mongodb::options::ClientOptions::parse("mongodb://localhost:27017")
            .await
            .unwrap();
        let client = mongodb::Client::with_options(options).unwrap();
        MongoDB::from_database(client.database("enrollment-test"))
    }

    #[actix_web::test]
    async fn empty_review_patch_is_bad_request() {
        let db = disconnected_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .route("/classes/{id}", web::patch().to(review_class)),
        )
        .await;

        let id = mongodb::bson::oid::ObjectId::new().to_hex();
        let req = test::TestRequest::patch()
            .uri(&format!("/classes/{}", id))
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn malformed_class_id_is_bad_request() {
        let db = disconnected_db().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(db))
                .route("/classes/{id}", web::patch().to(review_class)),
        )
        .await;

        let req = test::TestRequest::patch()
            .uri("/classes/not-an-object-id")
            .set_json(serde_json::json!({ "status": "approved" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
