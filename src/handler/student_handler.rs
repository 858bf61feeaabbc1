use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use bson::oid::ObjectId;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::dto::student_dto::{
    AddStudentRequest, LoginRequest, SetupPointer, SetupRequest, StudentIdentity, StudentRecord,
};
use crate::service::student_service::{AuthOutcome, StudentService, StudentServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};

// Login (admin or student)
pub async fn login_handler(
    State(service): State<Arc<StudentServiceImpl>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    match service
        .authenticate(&payload.role, &payload.id, &payload.password)
        .await
    {
        Ok(AuthOutcome::Admin) => Ok(Json(json!({
            "success": true,
            "user": { "role": "admin", "fullName": "System Admin" },
        }))),
        Ok(AuthOutcome::SetupRequired { id, student_id }) => Ok(Json(json!({
            "success": true,
            "needsSetup": true,
            "student": SetupPointer::new(id, student_id),
        }))),
        Ok(AuthOutcome::Student(student)) => Ok(Json(json!({
            "success": true,
            "user": StudentIdentity { role: "student", record: StudentRecord::from(student) },
        }))),
        Err(ServiceError::InvalidCredentials(_)) => {
            let message = if payload.role == "admin" {
                "Invalid Admin credentials"
            } else {
                "Incorrect password"
            };
            Err(HandlerError::auth(HandlerErrorKind::Unauthorized, message))
        }
        Err(ServiceError::NotFound(_)) => {
            Err(HandlerError::auth(HandlerErrorKind::NotFound, "Student ID not found"))
        }
        Err(e) => {
            error!("Login failed: {}", e);
            Err(HandlerError::auth(HandlerErrorKind::Internal, "Server error"))
        }
    }
}

// First-login password setup. Every failure, including an identifier that
// resolves to nothing, surfaces as the same generic response.
pub async fn setup_password_handler(
    State(service): State<Arc<StudentServiceImpl>>,
    Json(payload): Json<SetupRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let setup_failed = || HandlerError::auth(HandlerErrorKind::Internal, "Password setup failed");

    let record_id = ObjectId::parse_str(&payload.firestore_id).map_err(|e| {
        error!("Invalid record identifier in setup request: {}", e);
        setup_failed()
    })?;
    service.complete_setup(record_id, &payload.password).await.map_err(|e| {
        error!("Password setup failed: {}", e);
        setup_failed()
    })?;
    Ok(Json(json!({ "success": true })))
}

// Get all students (admin)
pub async fn list_students_handler(
    State(service): State<Arc<StudentServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let students = service.list_students().await.map_err(|e| {
        error!("Failed to list students: {}", e);
        HandlerError::management("Error fetching students")
    })?;
    let records: Vec<StudentRecord> = students.into_iter().map(StudentRecord::from).collect();
    Ok(Json(records))
}

// Add student (admin)
pub async fn add_student_handler(
    State(service): State<Arc<StudentServiceImpl>>,
    Json(payload): Json<AddStudentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let created = service.add_student(payload).await.map_err(|e| {
        error!("Failed to add student: {}", e);
        HandlerError::management("Error adding student")
    })?;
    Ok(Json(StudentRecord::from(created)))
}

// Record full payment (admin)
pub async fn pay_handler(
    State(service): State<Arc<StudentServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let payment_failed = || HandlerError::management("Payment update failed");

    let record_id = ObjectId::parse_str(&id).map_err(|e| {
        error!("Invalid record identifier in payment request: {}", e);
        payment_failed()
    })?;
    let updated = service.record_full_payment(record_id).await.map_err(|e| {
        error!("Payment update failed: {}", e);
        payment_failed()
    })?;
    Ok(Json(StudentRecord::from(updated)))
}
