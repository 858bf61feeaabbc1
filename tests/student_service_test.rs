use std::sync::Arc;

use bson::oid::ObjectId;

use student_ledger_backend::config::admin_conf::AdminConfig;
use student_ledger_backend::dto::student_dto::AddStudentRequest;
use student_ledger_backend::model::student::{PaymentStatus, Student};
use student_ledger_backend::repository::student_repo::StudentRepository;
use student_ledger_backend::service::student_service::{
    AuthOutcome, StudentService, StudentServiceImpl,
};
use student_ledger_backend::util::error::ServiceError;

mod common;
use common::InMemoryStudentRepository;

fn service_with_repo() -> (Arc<InMemoryStudentRepository>, StudentServiceImpl) {
    let repo = Arc::new(InMemoryStudentRepository::default());
    let service = StudentServiceImpl::new(repo.clone(), AdminConfig::default());
    (repo, service)
}

fn enrol_fields(fee: Option<f64>) -> AddStudentRequest {
    AddStudentRequest {
        full_name: Some("Amina K".to_string()),
        phone: None,
        parent_phone: None,
        monthly_fee: fee,
    }
}

#[tokio::test]
async fn test_authenticate_admin() {
    let (_, service) = service_with_repo();

    let outcome = service.authenticate("admin", "admin", "admin123").await.unwrap();
    assert!(matches!(outcome, AuthOutcome::Admin));

    let err = service.authenticate("admin", "admin", "nope").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials(_)));

    let err = service.authenticate("admin", "nope", "admin123").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials(_)));
}

#[tokio::test]
async fn test_authenticate_unknown_student_is_not_found() {
    let (_, service) = service_with_repo();
    let err = service.authenticate("student", "4242", "pw").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_authenticate_without_hash_requires_setup() {
    let (_, service) = service_with_repo();
    let created = service.add_student(enrol_fields(Some(500.0))).await.unwrap();

    // No password comparison happens; any input yields the setup outcome.
    let outcome = service.authenticate("student", "1001", "anything").await.unwrap();
    match outcome {
        AuthOutcome::SetupRequired { id, student_id } => {
            assert_eq!(Some(id), created.id);
            assert_eq!(student_id, "1001");
        }
        other => panic!("expected SetupRequired, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authenticate_treats_empty_hash_as_unset() {
    let (repo, service) = service_with_repo();
    let mut student = Student::create("1001".to_string(), enrol_fields(None));
    student.password_hash = Some(String::new());
    repo.insert(student).await.unwrap();

    let outcome = service.authenticate("student", "1001", "anything").await.unwrap();
    assert!(matches!(outcome, AuthOutcome::SetupRequired { .. }));
}

#[tokio::test]
async fn test_setup_then_authenticate() {
    let (_, service) = service_with_repo();
    let created = service.add_student(enrol_fields(Some(500.0))).await.unwrap();
    let record_id = created.id.unwrap();

    service.complete_setup(record_id, "pass1234").await.unwrap();

    let outcome = service.authenticate("student", "1001", "pass1234").await.unwrap();
    match outcome {
        AuthOutcome::Student(student) => {
            assert_eq!(student.student_id, "1001");
            assert_eq!(student.balance, 500.0);
        }
        other => panic!("expected Student, got {:?}", other),
    }

    let err = service.authenticate("student", "1001", "pass1235").await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidCredentials(_)));
}

#[tokio::test]
async fn test_setup_with_unknown_record_id_is_not_found() {
    let (_, service) = service_with_repo();
    let err = service.complete_setup(ObjectId::new(), "pass1234").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_add_student_assigns_sequential_ids() {
    let (_, service) = service_with_repo();
    let first = service.add_student(enrol_fields(Some(100.0))).await.unwrap();
    let second = service.add_student(enrol_fields(None)).await.unwrap();
    let third = service.add_student(enrol_fields(Some(0.0))).await.unwrap();
    assert_eq!(first.student_id, "1001");
    assert_eq!(second.student_id, "1002");
    assert_eq!(third.student_id, "1003");
}

#[tokio::test]
async fn test_add_student_derives_fee_state() {
    let (_, service) = service_with_repo();

    let owing = service.add_student(enrol_fields(Some(300.0))).await.unwrap();
    assert_eq!(owing.balance, 300.0);
    assert_eq!(owing.payment_status, PaymentStatus::Pending);
    assert!(!owing.examination_access);

    let paid_up = service.add_student(enrol_fields(None)).await.unwrap();
    assert_eq!(paid_up.balance, 0.0);
    assert_eq!(paid_up.payment_status, PaymentStatus::Paid);
    assert!(paid_up.examination_access);
}

#[tokio::test]
async fn test_record_full_payment_is_idempotent() {
    let (_, service) = service_with_repo();
    let created = service.add_student(enrol_fields(Some(750.0))).await.unwrap();
    let record_id = created.id.unwrap();

    let first = service.record_full_payment(record_id).await.unwrap();
    let second = service.record_full_payment(record_id).await.unwrap();

    for updated in [first, second] {
        assert_eq!(updated.balance, 0.0);
        assert_eq!(updated.payment_status, PaymentStatus::Paid);
        assert!(updated.examination_access);
        assert_eq!(updated.monthly_fee, 750.0);
    }
}

#[tokio::test]
async fn test_record_full_payment_unknown_id_is_not_found() {
    let (_, service) = service_with_repo();
    let err = service.record_full_payment(ObjectId::new()).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_list_students_orders_by_id_descending() {
    let (_, service) = service_with_repo();
    for _ in 0..3 {
        service.add_student(enrol_fields(Some(100.0))).await.unwrap();
    }

    let students = service.list_students().await.unwrap();
    let ids: Vec<&str> = students.iter().map(|s| s.student_id.as_str()).collect();
    assert_eq!(ids, vec!["1003", "1002", "1001"]);
}

#[tokio::test]
async fn test_created_record_round_trips_through_lookup() {
    let (repo, service) = service_with_repo();
    let created = service
        .add_student(AddStudentRequest {
            full_name: Some("Amina K".to_string()),
            phone: Some("0550000000".to_string()),
            parent_phone: Some("0660000000".to_string()),
            monthly_fee: Some(500.0),
        })
        .await
        .unwrap();

    let fetched = repo.find_by_student_id("1001").await.unwrap().unwrap();
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.full_name, created.full_name);
    assert_eq!(fetched.phone, created.phone);
    assert_eq!(fetched.parent_phone, created.parent_phone);
    assert_eq!(fetched.monthly_fee, created.monthly_fee);
    assert_eq!(fetched.balance, created.balance);
    assert_eq!(fetched.payment_status, created.payment_status);
    assert_eq!(fetched.examination_access, created.examination_access);
    assert_eq!(fetched.created_at, created.created_at);
}
