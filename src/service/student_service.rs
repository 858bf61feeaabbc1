use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use tracing::{error, info, instrument};

use crate::config::admin_conf::AdminConfig;
use crate::dto::student_dto::AddStudentRequest;
use crate::model::student::Student;
use crate::repository::student_repo::StudentRepository;
use crate::util::digest;
use crate::util::error::ServiceError;

/// The first identifier ever handed out; later ones count up from the
/// current maximum.
const FIRST_STUDENT_ID: u64 = 1001;

/// Result of an authentication attempt.
#[derive(Debug, Clone)]
pub enum AuthOutcome {
    /// The configured admin credential pair matched.
    Admin,
    /// The student exists but has never chosen a password. Carries only the
    /// record identifier and the human-facing ID; no password was compared.
    SetupRequired { id: ObjectId, student_id: String },
    /// The supplied password matched the stored digest.
    Student(Student),
}

#[async_trait]
pub trait StudentService: Send + Sync {
    async fn authenticate(&self, role: &str, id: &str, password: &str)
        -> Result<AuthOutcome, ServiceError>;
    async fn complete_setup(&self, record_id: ObjectId, password: &str)
        -> Result<(), ServiceError>;
    async fn list_students(&self) -> Result<Vec<Student>, ServiceError>;
    async fn add_student(&self, fields: AddStudentRequest) -> Result<Student, ServiceError>;
    async fn record_full_payment(&self, record_id: ObjectId) -> Result<Student, ServiceError>;
}

/// Computes the identifier for the next student given the greatest one
/// currently stored. IDs are numeric strings, never reused, never gapped.
pub fn next_student_id(last: Option<&str>) -> String {
    last.and_then(|id| id.parse::<u64>().ok())
        .map(|n| n + 1)
        .unwrap_or(FIRST_STUDENT_ID)
        .to_string()
}

pub struct StudentServiceImpl {
    pub repo: Arc<dyn StudentRepository>,
    pub admin: AdminConfig,
}

impl StudentServiceImpl {
    pub fn new(repo: Arc<dyn StudentRepository>, admin: AdminConfig) -> Self {
        Self { repo, admin }
    }
}

#[async_trait]
impl StudentService for StudentServiceImpl {
    #[instrument(skip(self, password), fields(role = %role, id = %id))]
    async fn authenticate(
        &self,
        role: &str,
        id: &str,
        password: &str,
    ) -> Result<AuthOutcome, ServiceError> {
        if role == "admin" {
            if id == self.admin.username && password == self.admin.password {
                info!("Admin authenticated");
                return Ok(AuthOutcome::Admin);
            }
            error!("Admin credential mismatch");
            return Err(ServiceError::InvalidCredentials(
                "admin credential mismatch".to_string(),
            ));
        }

        let student = self
            .repo
            .find_by_student_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no student with ID {}", id)))?;

        if student.needs_setup() {
            info!("Student has no password yet, setup required");
            let record_id = student.id.ok_or_else(|| {
                ServiceError::Internal("stored student record has no _id".to_string())
            })?;
            return Ok(AuthOutcome::SetupRequired {
                id: record_id,
                student_id: student.student_id,
            });
        }

        let stored = student.password_hash.as_deref().unwrap_or_default();
        if digest::matches(password, stored) {
            info!("Student authenticated");
            Ok(AuthOutcome::Student(student))
        } else {
            error!("Password digest mismatch for student {}", id);
            Err(ServiceError::InvalidCredentials(format!(
                "password mismatch for student {}",
                id
            )))
        }
    }

    #[instrument(skip(self, password), fields(record_id = %record_id))]
    async fn complete_setup(
        &self,
        record_id: ObjectId,
        password: &str,
    ) -> Result<(), ServiceError> {
        let password_hash = digest::sha256_hex(password);
        self.repo.set_password_hash(record_id, &password_hash).await?;
        info!("Student password setup complete");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>, ServiceError> {
        Ok(self.repo.list_all().await?)
    }

    #[instrument(skip(self, fields))]
    async fn add_student(&self, fields: AddStudentRequest) -> Result<Student, ServiceError> {
        // Read-then-write: two concurrent creations can pick the same ID.
        // The unique index rejects the loser, surfaced as a creation failure.
        let last = self.repo.last_student_id().await?;
        let student_id = next_student_id(last.as_deref());
        let student = Student::create(student_id, fields);
        let created = self.repo.insert(student).await?;
        info!("Student {} created", created.student_id);
        Ok(created)
    }

    #[instrument(skip(self), fields(record_id = %record_id))]
    async fn record_full_payment(&self, record_id: ObjectId) -> Result<Student, ServiceError> {
        let updated = self.repo.mark_paid(record_id).await?;
        info!("Full payment recorded for student {}", updated.student_id);
        Ok(updated)
    }
}
