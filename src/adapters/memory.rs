use crate::domain::{PassId, RegistrationStore, StoredRegistration};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-lifetime registration store. Unbounded; everything is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRegistrationStore {
    registrations: RwLock<HashMap<PassId, StoredRegistration>>,
}

impl MemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegistrationStore for MemoryRegistrationStore {
    async fn insert(&self, registration: StoredRegistration) -> Result<()> {
        let mut registrations = self.registrations.write().await;
        registrations.insert(registration.record.pass_id.clone(), registration);
        Ok(())
    }

    async fn get(&self, pass_id: &PassId) -> Result<Option<StoredRegistration>> {
        let registrations = self.registrations.read().await;
        Ok(registrations.get(pass_id).cloned())
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.registrations.read().await.len())
    }
}
