use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Enrollment Service API",
        version = "1.0.0",
        description = "REST backend for the course-enrollment platform.\n\n**Authentication:** Token-gated endpoints require a JWT Bearer token issued by `POST /jwt`. Admin endpoints additionally require the admin role on the user document."
    ),
    paths(
        // Auth
        crate::api::auth::issue_jwt,

        // Health
        crate::api::health::health_check,

        // Classes
        crate::api::classes::list_approved_classes,
        crate::api::classes::list_all_classes,
        crate::api::classes::my_classes,
        crate::api::classes::create_class,
        crate::api::classes::review_class,

        // Users
        crate::api::users::list_users,
        crate::api::users::register_user,
        crate::api::users::check_admin,
        crate::api::users::make_admin,
        crate::api::users::make_instructor,

        // Selected classes
        crate::api::selected_classes::list_selected_classes,
        crate::api::selected_classes::select_class,
        crate::api::selected_classes::unselect_class,

        // Payments
        crate::api::payments::create_payment_intent,
        crate::api::payments::record_payment,
        crate::api::payments::list_enrollments,
    ),
    components(
        schemas(
            // Auth
            crate::api::auth::IssueTokenRequest,
            crate::api::auth::IssueTokenResponse,

            // Health
            crate::api::health::HealthResponse,

            // Domain documents
            crate::models::User,
            crate::models::Role,
            crate::models::Class,
            crate::models::ClassStatus,
            crate::models::SelectedClass,
            crate::models::Payment,

            // Classes
            crate::services::class_service::CreateClassRequest,
            crate::services::class_service::CreateClassResponse,
            crate::services::class_service::ReviewClassRequest,
            crate::services::class_service::ReviewClassResponse,

            // Users
            crate::services::user_service::RegisterUserRequest,
            crate::services::user_service::RegisterUserResponse,
            crate::services::user_service::AssignRoleResponse,
            crate::api::users::AdminCheckResponse,

            // Selected classes
            crate::services::selected_class_service::SelectClassRequest,
            crate::services::selected_class_service::SelectClassResponse,
            crate::services::selected_class_service::UnselectClassResponse,

            // Payments
            crate::services::stripe_service::CreatePaymentIntentRequest,
            crate::services::stripe_service::CreatePaymentIntentResponse,
            crate::services::payment_service::RecordPaymentRequest,
            crate::services::payment_service::RecordPaymentResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Token issuance. Clients exchange an email payload for a one-hour signed token."),
        (name = "Health", description = "Health check endpoints for monitoring."),
        (name = "Classes", description = "Class catalog, instructor dashboard, and admin review."),
        (name = "Users", description = "Registration, listing, and role management."),
        (name = "SelectedClasses", description = "A student's picked classes before payment."),
        (name = "Payments", description = "Stripe payment intents and recorded payment history."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter the token from POST /jwt"))
                        .build(),
                ),
            );
        }
    }
}
