pub mod auth;
pub mod classes;
pub mod health;
pub mod payments;
pub mod selected_classes;
pub mod swagger;
pub mod users;
