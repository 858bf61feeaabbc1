use async_trait::async_trait;
use bson::oid::ObjectId;
use std::sync::{Arc, Mutex};

use student_ledger_backend::config::admin_conf::AdminConfig;
use student_ledger_backend::model::student::{PaymentStatus, Student};
use student_ledger_backend::repository::repository_error::{RepositoryError, RepositoryResult};
use student_ledger_backend::repository::student_repo::StudentRepository;
use student_ledger_backend::router::student_router::student_router;
use student_ledger_backend::service::student_service::StudentServiceImpl;

/// Stand-in for the Mongo collection with the same observable contract:
/// unique `studentId`, sorted scans, update-by-id returning the updated
/// document.
#[derive(Default)]
pub struct InMemoryStudentRepository {
    students: Mutex<Vec<Student>>,
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn insert(&self, mut student: Student) -> RepositoryResult<Student> {
        let mut students = self.students.lock().unwrap();
        // Mirrors the unique index on studentId.
        if students.iter().any(|s| s.student_id == student.student_id) {
            return Err(RepositoryError::AlreadyExists(format!(
                "Duplicate key: studentId {}",
                student.student_id
            )));
        }
        student.id = Some(ObjectId::new());
        students.push(student.clone());
        Ok(student)
    }

    async fn find_by_student_id(&self, student_id: &str) -> RepositoryResult<Option<Student>> {
        let students = self.students.lock().unwrap();
        Ok(students.iter().find(|s| s.student_id == student_id).cloned())
    }

    async fn last_student_id(&self) -> RepositoryResult<Option<String>> {
        let students = self.students.lock().unwrap();
        Ok(students.iter().map(|s| s.student_id.clone()).max())
    }

    async fn list_all(&self) -> RepositoryResult<Vec<Student>> {
        let students = self.students.lock().unwrap();
        let mut all = students.clone();
        all.sort_by(|a, b| b.student_id.cmp(&a.student_id));
        Ok(all)
    }

    async fn set_password_hash(&self, id: ObjectId, password_hash: &str) -> RepositoryResult<()> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == Some(id)) {
            Some(student) => {
                student.password_hash = Some(password_hash.to_string());
                Ok(())
            }
            None => Err(RepositoryError::NotFound(format!("No student found for ID: {}", id))),
        }
    }

    async fn mark_paid(&self, id: ObjectId) -> RepositoryResult<Student> {
        let mut students = self.students.lock().unwrap();
        match students.iter_mut().find(|s| s.id == Some(id)) {
            Some(student) => {
                student.balance = 0.0;
                student.payment_status = PaymentStatus::Paid;
                student.examination_access = true;
                Ok(student.clone())
            }
            None => Err(RepositoryError::NotFound(format!("No student found for ID: {}", id))),
        }
    }
}

#[allow(dead_code)]
pub fn test_service() -> Arc<StudentServiceImpl> {
    let repo = Arc::new(InMemoryStudentRepository::default());
    Arc::new(StudentServiceImpl::new(repo, AdminConfig::default()))
}

#[allow(dead_code)]
pub fn test_app() -> axum::Router {
    student_router(test_service())
}
