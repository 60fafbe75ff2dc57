use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database};
use thiserror::Error;

pub const EMPLOYEES: &str = "employees";
pub const ATTENDANCE: &str = "attendance";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    Backend(String),
    #[error("malformed document: {0}")]
    Malformed(String),
}

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

impl From<mongodb::bson::document::ValueAccessError> for StoreError {
    fn from(e: mongodb::bson::document::ValueAccessError) -> Self {
        StoreError::Malformed(e.to_string())
    }
}

#[derive(Debug, Clone)]
enum Clause {
    Eq(Bson),
    EqIgnoreCase(String),
    /// Half-open range: gte <= value < lt.
    Range { gte: Bson, lt: Bson },
}

/// ANDed field predicates, built up clause by clause.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    clauses: Vec<(String, Clause)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Bson>) -> Self {
        self.clauses.push((field.to_owned(), Clause::Eq(value.into())));
        self
    }

    pub fn eq_ignore_case(mut self, field: &str, value: &str) -> Self {
        self.clauses
            .push((field.to_owned(), Clause::EqIgnoreCase(value.to_owned())));
        self
    }

    pub fn between(mut self, field: &str, gte: impl Into<Bson>, lt: impl Into<Bson>) -> Self {
        self.clauses.push((
            field.to_owned(),
            Clause::Range {
                gte: gte.into(),
                lt: lt.into(),
            },
        ));
        self
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        for (field, clause) in &self.clauses {
            match clause {
                Clause::Eq(value) => {
                    document.insert(field.as_str(), value.clone());
                }
                Clause::EqIgnoreCase(value) => {
                    document.insert(
                        field.as_str(),
                        doc! {
                            "$regex": format!("^{}$", regex::escape(value)),
                            "$options": "i",
                        },
                    );
                }
                Clause::Range { gte, lt } => {
                    document.insert(field.as_str(), doc! { "$gte": gte.clone(), "$lt": lt.clone() });
                }
            }
        }
        document
    }
}

#[derive(Debug, Clone)]
pub struct Sort {
    field: String,
    direction: i32,
}

impl Sort {
    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_owned(),
            direction: -1,
        }
    }

    fn to_document(&self) -> Document {
        let mut document = Document::new();
        document.insert(self.field.as_str(), self.direction);
        document
    }
}

/// Generic interface to a document collection. Repositories depend on
/// this trait rather than on a concrete client, so the backing store is
/// injected at construction time.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_one(&self, collection: &str, filter: Filter)
    -> Result<Option<Document>, StoreError>;

    async fn find_many(
        &self,
        collection: &str,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Returns the store-assigned id of the inserted document.
    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError>;

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
    ) -> Result<u64, StoreError>;

    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<u64, StoreError>;

    async fn delete_many(&self, collection: &str, filter: Filter) -> Result<u64, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, database_name: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let db = client.database(database_name);
        Ok(Self { client, db })
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl RecordStore for MongoStore {
    async fn find_one(
        &self,
        collection: &str,
        filter: Filter,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self
            .collection(collection)
            .find_one(filter.to_document(), None)
            .await?)
    }

    async fn find_many(
        &self,
        collection: &str,
        filter: Filter,
        sort: Option<Sort>,
    ) -> Result<Vec<Document>, StoreError> {
        let options = sort.map(|s| FindOptions::builder().sort(s.to_document()).build());
        let cursor = self
            .collection(collection)
            .find(filter.to_document(), options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, StoreError> {
        let result = self.collection(collection).insert_one(document, None).await?;
        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Filter,
        set: Document,
    ) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter.to_document(), doc! { "$set": set }, None)
            .await?;
        Ok(result.modified_count)
    }

    async fn delete_one(&self, collection: &str, filter: Filter) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_one(filter.to_document(), None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn delete_many(&self, collection: &str, filter: Filter) -> Result<u64, StoreError> {
        let result = self
            .collection(collection)
            .delete_many(filter.to_document(), None)
            .await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await?;
        Ok(())
    }
}
