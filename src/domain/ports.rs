use crate::domain::model::{PassId, RegistrationRecord, RegistrationRequest, StoredRegistration};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the registration service keeps issued passes.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    async fn insert(&self, registration: StoredRegistration) -> Result<()>;
    async fn get(&self, pass_id: &PassId) -> Result<Option<StoredRegistration>>;
    async fn len(&self) -> Result<usize>;
}

/// Client side of `POST /register`.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationRecord>;
}

/// Destination for exported pass documents.
pub trait DocumentSink: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
