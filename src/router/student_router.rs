use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handler::student_handler::{
    add_student_handler, list_students_handler, login_handler, pay_handler,
    setup_password_handler,
};
use crate::service::student_service::StudentServiceImpl;

pub fn student_router(service: Arc<StudentServiceImpl>) -> Router {
    Router::new()
        .route("/api/login", post(login_handler))
        .route("/api/students/setup", post(setup_password_handler))
        .route("/api/students", get(list_students_handler).post(add_student_handler))
        .route("/api/students/{id}/pay", patch(pay_handler))
        .with_state(service)
}
