use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::{
    database::MongoDB,
    models::{Role, User},
    services::{token_service::Claims, user_service},
};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AdminCheckResponse {
    pub admin: bool,
}

/// GET /users - List registered users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users", body = [User]),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn list_users(db: web::Data<MongoDB>) -> impl Responder {
    match user_service::list_users(&db).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(e) => {
            log::error!("Error listing users: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// POST /users - Register a user, skipping duplicates by email
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = user_service::RegisterUserRequest,
    responses(
        (status = 200, description = "User created, or already-exists message", body = user_service::RegisterUserResponse)
    )
)]
pub async fn register_user(
    db: web::Data<MongoDB>,
    request: web::Json<user_service::RegisterUserRequest>,
) -> impl Responder {
    match user_service::register_user(&db, request.into_inner()).await {
        // Duplicate email is a soft outcome; still a 200.
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error registering user: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// GET /users/admin/{email} - Does this email hold the admin role?
#[utoipa::path(
    get,
    path = "/users/admin/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Email to check")),
    responses(
        (status = 200, description = "Admin flag for the email", body = AdminCheckResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn check_admin(
    user: web::ReqData<Claims>,
    db: web::Data<MongoDB>,
    path: web::Path<String>,
) -> impl Responder {
    let email = path.into_inner();

    // Only your own admin flag is visible; anyone else reads false.
    if user.email != email {
        return HttpResponse::Ok().json(AdminCheckResponse { admin: false });
    }

    match user_service::is_admin(&db, &email).await {
        Ok(admin) => HttpResponse::Ok().json(AdminCheckResponse { admin }),
        Err(e) => {
            log::error!("Error checking admin role for {}: {}", email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}

/// PATCH /users/admin/{id} - Promote a user to admin
#[utoipa::path(
    patch,
    path = "/users/admin/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User document id")),
    responses(
        (status = 200, description = "Role updated", body = user_service::AssignRoleResponse),
        (status = 400, description = "Invalid user id")
    )
)]
pub async fn make_admin(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    assign_role(db, path.into_inner(), Role::Admin).await
}

/// PATCH /users/instructor/{id} - Promote a user to instructor
#[utoipa::path(
    patch,
    path = "/users/instructor/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User document id")),
    responses(
        (status = 200, description = "Role updated", body = user_service::AssignRoleResponse),
        (status = 400, description = "Invalid user id")
    )
)]
pub async fn make_instructor(db: web::Data<MongoDB>, path: web::Path<String>) -> impl Responder {
    assign_role(db, path.into_inner(), Role::Instructor).await
}

async fn assign_role(db: web::Data<MongoDB>, id: String, role: Role) -> HttpResponse {
    if mongodb::bson::oid::ObjectId::parse_str(&id).is_err() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Invalid user ID"
        }));
    }

    match user_service::assign_role(&db, &id, role).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => {
            log::error!("Error assigning role to {}: {}", id, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": e
            }))
        }
    }
}
