//! In-process lock service.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use hubsync_lock_interface::{LockError, LockInstance, LockService, LockStatus};

// The run lock of a reconciliation cycle is held across pagination and
// retries, so the TTL must outlast the slowest cycle.
const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(3600);

struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Local lock service, backed by an in-process table.
///
/// Expired entries behave as absent, so a crashed holder cannot wedge a
/// resource forever.
pub struct LocalLockService {
    lock_timeout: Duration,
    resources: Mutex<HashMap<String, Entry>>,
}

impl Default for LocalLockService {
    fn default() -> Self {
        Self::with_lock_timeout(DEFAULT_LOCK_TIMEOUT)
    }
}

impl LocalLockService {
    /// Creates a local lock service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a local lock service with a custom lock expiry.
    pub fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            lock_timeout,
            resources: Mutex::default(),
        }
    }
}

#[async_trait]
impl LockService for LocalLockService {
    #[tracing::instrument(skip(self), ret)]
    async fn try_lock_resource<'a>(&'a self, name: &str) -> Result<LockStatus<'a>, LockError> {
        let mut resources = self.resources.lock().unwrap();
        match resources.get(name) {
            Some(entry) if !entry.expired() => Ok(LockStatus::AlreadyLocked),
            _ => {
                resources.insert(
                    name.into(),
                    Entry {
                        value: "1".into(),
                        expires_at: Instant::now() + self.lock_timeout,
                    },
                );
                Ok(LockStatus::SuccessfullyLocked(LockInstance::new(
                    self, name,
                )))
            }
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn has_resource(&self, name: &str) -> Result<bool, LockError> {
        let resources = self.resources.lock().unwrap();
        Ok(matches!(resources.get(name), Some(entry) if !entry.expired()))
    }

    #[tracing::instrument(skip(self))]
    async fn del_resource(&self, name: &str) -> Result<(), LockError> {
        self.resources.lock().unwrap().remove(name);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn sleep_for_duration(&self, duration: Duration) -> Result<(), LockError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn set_resource(
        &self,
        name: &str,
        value: &str,
        timeout: Duration,
    ) -> Result<(), LockError> {
        self.resources.lock().unwrap().insert(
            name.into(),
            Entry {
                value: value.into(),
                expires_at: Instant::now() + timeout,
            },
        );
        Ok(())
    }

    #[tracing::instrument(skip(self), ret)]
    async fn get_resource(&self, name: &str) -> Result<Option<String>, LockError> {
        let resources = self.resources.lock().unwrap();
        Ok(resources
            .get(name)
            .filter(|entry| !entry.expired())
            .map(|entry| entry.value.clone()))
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), LockError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lock_is_exclusive_until_released() {
        let service = LocalLockService::new();

        let status = service.try_lock_resource("resource").await.unwrap();
        let instance = match status {
            LockStatus::SuccessfullyLocked(instance) => instance,
            LockStatus::AlreadyLocked => panic!("first lock should succeed"),
        };

        assert!(matches!(
            service.try_lock_resource("resource").await.unwrap(),
            LockStatus::AlreadyLocked
        ));

        instance.release().await.unwrap();

        assert!(matches!(
            service.try_lock_resource("resource").await.unwrap(),
            LockStatus::SuccessfullyLocked(_)
        ));
    }

    #[tokio::test]
    async fn distinct_resources_do_not_contend() {
        let service = LocalLockService::new();

        let first = service.try_lock_resource("pull-request/1").await.unwrap();
        let second = service.try_lock_resource("pull-request/2").await.unwrap();

        assert!(matches!(first, LockStatus::SuccessfullyLocked(_)));
        assert!(matches!(second, LockStatus::SuccessfullyLocked(_)));
    }

    #[tokio::test]
    async fn expired_lock_behaves_as_absent() {
        let service = LocalLockService::with_lock_timeout(Duration::from_millis(0));

        assert!(matches!(
            service.try_lock_resource("resource").await.unwrap(),
            LockStatus::SuccessfullyLocked(_)
        ));
        assert!(matches!(
            service.try_lock_resource("resource").await.unwrap(),
            LockStatus::SuccessfullyLocked(_)
        ));
    }

    #[tokio::test]
    async fn values_round_trip_until_expiry() {
        let service = LocalLockService::new();

        service
            .set_resource("key", "value", Duration::from_secs(60))
            .await
            .unwrap();
        assert_eq!(
            service.get_resource("key").await.unwrap(),
            Some("value".into())
        );

        service
            .set_resource("key", "value", Duration::from_millis(0))
            .await
            .unwrap();
        assert_eq!(service.get_resource("key").await.unwrap(), None);
    }
}
