use crate::config::mongo_conf::MongoConfig;
use crate::model::student::Student;
use crate::repository::repository_error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use futures::stream::StreamExt;
use tracing::{error, info, warn};

/// What the service layer requires of the student store: single-document
/// lookups by field, a sorted scan, an insert and two partial updates.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn insert(&self, student: Student) -> RepositoryResult<Student>;
    async fn find_by_student_id(&self, student_id: &str) -> RepositoryResult<Option<Student>>;
    /// The greatest `studentId` currently stored (string ordering, which the
    /// 1001-and-up ID space makes equivalent to numeric ordering).
    async fn last_student_id(&self) -> RepositoryResult<Option<String>>;
    /// All students, `studentId` descending.
    async fn list_all(&self) -> RepositoryResult<Vec<Student>>;
    async fn set_password_hash(&self, id: ObjectId, password_hash: &str) -> RepositoryResult<()>;
    /// Zeroes the balance and unlocks examination access, returning the
    /// updated record. Absolute and idempotent.
    async fn mark_paid(&self, id: ObjectId) -> RepositoryResult<Student>;
}

pub struct MongoStudentRepository {
    collection: mongodb::Collection<Student>,
}

impl MongoStudentRepository {
    pub async fn new(config: &MongoConfig) -> Result<Self, mongodb::error::Error> {
        use mongodb::{options::ClientOptions, Client};

        let mut client_options = ClientOptions::parse(&config.uri).await?;
        client_options.app_name = Some("StudentLedgerBackend".to_string());
        client_options.max_pool_size = Some(config.pool_size);
        client_options.connect_timeout =
            Some(std::time::Duration::from_secs(config.connection_timeout_secs));

        let client = Client::with_options(client_options)?;
        let db = client.database(&config.database);
        let collection = db.collection::<Student>(config.get_student_collection());

        let repo = MongoStudentRepository { collection };
        // The index is what turns a racing duplicate studentId into a write
        // failure instead of corrupt state. The server may be unreachable at
        // startup; keep serving and let individual requests fail instead.
        if let Err(e) = repo.ensure_indexes().await {
            warn!("Could not create studentId index: {}", e);
        } else {
            info!("Connected to MongoDB, studentId index in place");
        }
        Ok(repo)
    }

    async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let index = IndexModel::builder()
            .keys(doc! { "studentId": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection.create_index(index, None).await?;
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MongoStudentRepository {
    #[tracing::instrument(skip(self, student), fields(student_id = %student.student_id))]
    async fn insert(&self, mut student: Student) -> RepositoryResult<Student> {
        student.id = Some(ObjectId::new());
        match self.collection.insert_one(student.clone(), None).await {
            Ok(_) => {
                info!("Student created successfully");
                Ok(student)
            }
            Err(e) => {
                error!("Failed to insert student: {}", e);
                Err(RepositoryError::from(e))
            }
        }
    }

    #[tracing::instrument(skip(self), fields(student_id = %student_id))]
    async fn find_by_student_id(&self, student_id: &str) -> RepositoryResult<Option<Student>> {
        let filter = doc! { "studentId": student_id };
        self.collection
            .find_one(filter, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find student: {}", e)))
    }

    #[tracing::instrument(skip(self))]
    async fn last_student_id(&self) -> RepositoryResult<Option<String>> {
        use mongodb::options::FindOneOptions;

        let options = FindOneOptions::builder().sort(doc! { "studentId": -1 }).build();
        let last = self
            .collection
            .find_one(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to find last student: {}", e)))?;
        Ok(last.map(|s| s.student_id))
    }

    #[tracing::instrument(skip(self))]
    async fn list_all(&self) -> RepositoryResult<Vec<Student>> {
        use mongodb::options::FindOptions;

        let options = FindOptions::builder().sort(doc! { "studentId": -1 }).build();
        let mut cursor = self
            .collection
            .find(None, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to list students: {}", e)))?;

        let mut students = Vec::new();
        while let Some(student) = cursor.next().await {
            match student {
                Ok(s) => students.push(s),
                Err(e) => {
                    error!("Failed to deserialize student: {}", e);
                    return Err(RepositoryError::serialization(format!(
                        "Failed to deserialize student: {}",
                        e
                    )));
                }
            }
        }
        info!("Fetched {} students", students.len());
        Ok(students)
    }

    #[tracing::instrument(skip(self, password_hash), fields(id = %id))]
    async fn set_password_hash(&self, id: ObjectId, password_hash: &str) -> RepositoryResult<()> {
        let filter = doc! { "_id": id };
        let update = doc! { "$set": { "passwordHash": password_hash } };
        let result = self
            .collection
            .update_one(filter, update, None)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to set password hash: {}", e)))?;
        if result.matched_count == 0 {
            error!("No student found to set password for ID: {}", id);
            return Err(RepositoryError::not_found(format!(
                "No student found for ID: {}",
                id
            )));
        }
        info!("Password hash stored for student record {}", id);
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn mark_paid(&self, id: ObjectId) -> RepositoryResult<Student> {
        use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};

        let filter = doc! { "_id": id };
        let update = doc! { "$set": {
            "balance": 0.0,
            "paymentStatus": "Paid",
            "examinationAccess": true,
        } };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        let updated = self
            .collection
            .find_one_and_update(filter, update, options)
            .await
            .map_err(|e| RepositoryError::database(format!("Failed to record payment: {}", e)))?;
        match updated {
            Some(student) => {
                info!("Payment recorded for student {}", student.student_id);
                Ok(student)
            }
            None => {
                error!("No student found to mark paid for ID: {}", id);
                Err(RepositoryError::not_found(format!("No student found for ID: {}", id)))
            }
        }
    }
}
