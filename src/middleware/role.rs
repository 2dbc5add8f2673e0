use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::MongoDB;
use crate::models::Role;
use crate::services::{token_service::Claims, user_service};
use crate::utils::error::AppError;

/// Role gate for routes restricted to one role. Runs after
/// [`super::AuthMiddleware`]: reads the verified claims from request
/// extensions and re-queries the users collection on every request, so a
/// role change takes effect immediately.
pub struct RoleGate {
    required: Role,
}

impl RoleGate {
    pub fn new(required: Role) -> Self {
        Self { required }
    }
}

/// Pure gate decision: does the role on the user document satisfy the
/// gate's requirement? A gate on `Student` restricts nothing.
fn permits(required: Role, actual: Role) -> bool {
    match required {
        Role::Admin => actual == Role::Admin,
        Role::Instructor => actual == Role::Instructor,
        Role::Student => true,
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RoleGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RoleGateService {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RoleGateService<S> {
    service: Rc<S>,
    required: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;

        Box::pin(async move {
            let claims = req.extensions().get::<Claims>().cloned();
            let claims = match claims {
                Some(claims) => claims,
                // Gate without a verified identity means AuthMiddleware
                // was not in front of this route.
                None => return Err(AppError::Unauthorized.into()),
            };

            let db = req
                .app_data::<web::Data<MongoDB>>()
                .cloned()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("database handle missing")
                })?;

            let role = user_service::find_role(&db, &claims.email)
                .await
                .map_err(actix_web::error::ErrorInternalServerError)?;

            if !permits(required, role) {
                log::warn!(
                    "Role gate denied {} (has {:?}, needs {:?})",
                    claims.email,
                    role,
                    required
                );
                return Err(AppError::Forbidden.into());
            }

            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App, HttpResponse};

    #[::core::prelude::v1::test]
    fn admin_gate_admits_only_admins() {
        assert!(permits(Role::Admin, Role::Admin));
        assert!(!permits(Role::Admin, Role::Instructor));
        assert!(!permits(Role::Admin, Role::Student));
    }

    #[::core::prelude::v1::test]
    fn instructor_gate_admits_only_instructors() {
        assert!(permits(Role::Instructor, Role::Instructor));
        assert!(!permits(Role::Instructor, Role::Admin));
        assert!(!permits(Role::Instructor, Role::Student));
    }

    #[::core::prelude::v1::test]
    fn student_gate_admits_everyone() {
        assert!(permits(Role::Student, Role::Student));
        assert!(permits(Role::Student, Role::Instructor));
        assert!(permits(Role::Student, Role::Admin));
    }

    #[actix_web::test]
    async fn gate_without_claims_is_unauthorized() {
        // RoleGate registered without AuthMiddleware in front of it.
        let app = test::init_service(
            App::new().service(
                web::resource("/admin-only")
                    .wrap(RoleGate::new(Role::Admin))
                    .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/admin-only").to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
