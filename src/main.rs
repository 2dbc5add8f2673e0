mod api;
mod database;
mod middleware;
mod models;
mod services;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use middleware::{AuthMiddleware, RoleGate};
use models::Role;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("Starting Enrollment Service...");

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("MongoDB connected successfully");
    log::info!("Server starting on {}:{}", host, port);
    log::info!("Swagger UI available at: http://{}:{}/swagger-ui/", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/", web::get().to(api::health::index))
            .route("/health", web::get().to(api::health::health_check))
            // Token issuance
            .route("/jwt", web::post().to(api::auth::issue_jwt))
            // Classes: public catalog, token-gated creation. Route-level
            // wrap keeps the GET open while gating the POST on one path.
            .service(
                web::resource("/classes")
                    .route(web::get().to(api::classes::list_approved_classes))
                    .route(web::post().to(api::classes::create_class).wrap(AuthMiddleware)),
            )
            .route("/classes/{id}", web::patch().to(api::classes::review_class))
            // Classes: admin-only full listing. AuthMiddleware is wrapped
            // last so it runs first and RoleGate sees the claims.
            .service(
                web::resource("/allclasses")
                    .wrap(RoleGate::new(Role::Admin))
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::classes::list_all_classes)),
            )
            // Instructor dashboard
            .service(
                web::resource("/my-class")
                    .wrap(AuthMiddleware)
                    .route(web::get().to(api::classes::my_classes)),
            )
            // Selected classes (student cart)
            .service(
                web::resource("/select-class")
                    .route(web::get().to(api::selected_classes::list_selected_classes))
                    .route(web::post().to(api::selected_classes::select_class)),
            )
            .route(
                "/select-class/{id}",
                web::delete().to(api::selected_classes::unselect_class),
            )
            // Users: open registration, token-gated listing
            .service(
                web::resource("/users")
                    .route(web::post().to(api::users::register_user))
                    .route(web::get().to(api::users::list_users).wrap(AuthMiddleware)),
            )
            // Role management: the gated GET and the open PATCH share the
            // path pattern
            .service(
                web::resource("/users/admin/{id}")
                    .route(web::get().to(api::users::check_admin).wrap(AuthMiddleware))
                    .route(web::patch().to(api::users::make_admin)),
            )
            .route(
                "/users/instructor/{id}",
                web::patch().to(api::users::make_instructor),
            )
            // Payments
            .route(
                "/create-payment-intent",
                web::post().to(api::payments::create_payment_intent),
            )
            .route(
                "/paymenthistory",
                web::post().to(api::payments::record_payment),
            )
            .route(
                "/enrolledclass",
                web::get().to(api::payments::list_enrollments),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
