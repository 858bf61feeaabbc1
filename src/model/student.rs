use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::dto::student_dto::AddStudentRequest;

/// Fee state of a student. A student owes money iff the status is `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

/// The persisted student record.
///
/// Field names serialize in camelCase so documents match the layout the
/// collection already holds. `student_id` is the human-facing identifier;
/// `id` is the record identifier used by administrative operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: Option<ObjectId>,
    pub student_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_phone: Option<String>,
    #[serde(default)]
    pub monthly_fee: f64,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub examination_access: bool,
    #[serde(default)]
    pub password_hash: Option<String>,
    pub created_at: String,
}

impl Student {
    /// Builds a new record from the onboarding fields.
    ///
    /// `student_id` is assigned by the caller. The initial fee state is
    /// derived here and must stay mutually consistent: a positive fee means
    /// the balance is owed, payment is pending and examination access is
    /// withheld; otherwise the student starts fully paid up.
    pub fn create(student_id: String, fields: AddStudentRequest) -> Self {
        let fee = fields.monthly_fee.unwrap_or(0.0);
        let owes = fee > 0.0;
        Student {
            id: None,
            student_id,
            full_name: fields.full_name,
            phone: fields.phone,
            parent_phone: fields.parent_phone,
            monthly_fee: fee,
            balance: if owes { fee } else { 0.0 },
            payment_status: if owes { PaymentStatus::Pending } else { PaymentStatus::Paid },
            examination_access: !owes,
            password_hash: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether the student still has to choose a password. An empty stored
    /// hash counts as unset.
    pub fn needs_setup(&self) -> bool {
        match self.password_hash.as_deref() {
            None | Some("") => true,
            Some(_) => false,
        }
    }
}
