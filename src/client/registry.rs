use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::client::{Credentials, DysmsError, SmsClient};
use crate::domain::AccessKeyId;

/// Caller-owned cache of clients keyed by access key id.
///
/// Nothing in the crate creates one implicitly; hold it where you would otherwise keep a
/// process-wide client and pass it to the code that needs it.
#[derive(Clone, Default)]
pub struct ClientRegistry {
    clients: Arc<RwLock<HashMap<AccessKeyId, SmsClient>>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the client registered for `credentials`, building a default one on first use.
    ///
    /// A cached client is reused only when its credentials match; a rotated secret for the
    /// same access key id replaces the cached client.
    pub fn get_or_create(&self, credentials: Credentials) -> Result<SmsClient, DysmsError> {
        self.get_or_create_with(credentials, |credentials| {
            SmsClient::builder(credentials).build()
        })
    }

    /// Like [`ClientRegistry::get_or_create`] with a custom constructor.
    ///
    /// `build` runs at most once per credentials even when callers race.
    pub fn get_or_create_with<F>(
        &self,
        credentials: Credentials,
        build: F,
    ) -> Result<SmsClient, DysmsError>
    where
        F: FnOnce(Credentials) -> Result<SmsClient, DysmsError>,
    {
        if let Some(client) = self
            .get(credentials.access_key_id())
            .filter(|client| client.credentials() == &credentials)
        {
            return Ok(client);
        }

        let mut clients = self.clients.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = clients
            .get(credentials.access_key_id())
            .filter(|client| client.credentials() == &credentials)
        {
            return Ok(client.clone());
        }
        let key = credentials.access_key_id().clone();
        let client = build(credentials)?;
        clients.insert(key, client.clone());
        Ok(client)
    }

    pub fn get(&self, access_key_id: &AccessKeyId) -> Option<SmsClient> {
        self.clients
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(access_key_id)
            .cloned()
    }

    /// Register `client` under its own access key id, returning the one it replaces.
    pub fn insert(&self, client: SmsClient) -> Option<SmsClient> {
        let key = client.credentials().access_key_id().clone();
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, client)
    }

    pub fn remove(&self, access_key_id: &AccessKeyId) -> Option<SmsClient> {
        self.clients
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(access_key_id)
    }
}
