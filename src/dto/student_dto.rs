use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::model::student::{PaymentStatus, Student};

/// Body of `POST /api/login`.
///
/// `password` and `role` default to empty strings so a caller probing for
/// the setup-required outcome does not have to send a password at all.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub id: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
}

/// Body of `POST /api/students/setup`. The record identifier field keeps
/// its historical wire name.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    pub firestore_id: String,
    pub password: String,
}

/// Body of `POST /api/students`. Only the recognized optional fields are
/// kept; anything else in the request body is dropped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddStudentRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub parent_phone: Option<String>,
    pub monthly_fee: Option<f64>,
}

/// A student record as returned to clients: identical to the stored
/// document except that the record identifier is rendered as a hex string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub student_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    pub monthly_fee: f64,
    pub balance: f64,
    pub payment_status: PaymentStatus,
    pub examination_access: bool,
    pub password_hash: Option<String>,
    pub created_at: String,
}

impl From<Student> for StudentRecord {
    fn from(s: Student) -> Self {
        StudentRecord {
            id: s.id.map(|id| id.to_hex()).unwrap_or_default(),
            student_id: s.student_id,
            full_name: s.full_name,
            phone: s.phone,
            parent_phone: s.parent_phone,
            monthly_fee: s.monthly_fee,
            balance: s.balance,
            payment_status: s.payment_status,
            examination_access: s.examination_access,
            password_hash: s.password_hash,
            created_at: s.created_at,
        }
    }
}

/// The authenticated-student login payload: the full record plus the role
/// marker, flattened into one object.
#[derive(Debug, Serialize)]
pub struct StudentIdentity {
    pub role: &'static str,
    #[serde(flatten)]
    pub record: StudentRecord,
}

/// The minimal record reference handed back when a student still has to
/// choose a password.
#[derive(Debug, Serialize)]
pub struct SetupPointer {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "studentId")]
    pub student_id: String,
}

impl SetupPointer {
    pub fn new(id: ObjectId, student_id: String) -> Self {
        SetupPointer { id: id.to_hex(), student_id }
    }
}
