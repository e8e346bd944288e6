use std::sync::Arc;

use taskdeck_core::{AppError, AppResult, SessionUser};
use taskdeck_domain::{RoleDefinition, RoleId};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{PermissionEvaluator, RoleRepository};

mod mutations;


#[derive(Debug, Default)]
struct RoleCache {
    roles: Vec<RoleDefinition>,
    pending_fetches: usize,
    last_error: Option<String>,
}

impl RoleCache {
    /// Replaces the entry with the same id, or appends a new one.
    fn upsert(&mut self, role: RoleDefinition) {
        match self.roles.iter_mut().find(|entry| entry.id == role.id) {
            Some(entry) => *entry = role,
            None => self.roles.push(role),
        }
    }
}

/// Session-scoped cache of role definitions backed by the API.
///
/// The cache changes only after the API confirms a request. Concurrent
/// mutations each apply their own response, so the last one to arrive
/// wins.
#[derive(Clone)]
pub struct RoleStore {
    repository: Arc<dyn RoleRepository>,
    cache: Arc<RwLock<RoleCache>>,
}

impl RoleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new(repository: Arc<dyn RoleRepository>) -> Self {
        Self {
            repository,
            cache: Arc::new(RwLock::new(RoleCache::default())),
        }
    }

    /// Reloads every role.
    ///
    /// On failure the previous cache is kept and the error is recorded
    /// for [`RoleStore::last_error`].
    pub async fn fetch_roles(&self) -> AppResult<Vec<RoleDefinition>> {
        self.cache.write().await.pending_fetches += 1;

        let result = self.repository.list_roles().await;

        let mut cache = self.cache.write().await;
        cache.pending_fetches = cache.pending_fetches.saturating_sub(1);

        match result {
            Ok(roles) => {
                info!(role_count = roles.len(), "roles loaded");
                cache.roles = roles.clone();
                cache.last_error = None;
                Ok(roles)
            }
            Err(error) => {
                warn!(error = %error, "failed to load roles");
                cache.last_error = Some(error.user_message());
                Err(error)
            }
        }
    }

    /// Returns the raw cache, including roles that cannot be listed.
    pub async fn roles(&self) -> Vec<RoleDefinition> {
        self.cache.read().await.roles.clone()
    }

    /// Returns the roles that carry a name or display name.
    pub async fn valid_roles(&self) -> Vec<RoleDefinition> {
        self.cache
            .read()
            .await
            .roles
            .iter()
            .filter(|role| role.has_identity())
            .cloned()
            .collect()
    }

    /// Returns a cached role by id.
    pub async fn find_role(&self, role_id: &RoleId) -> Option<RoleDefinition> {
        self.cache
            .read()
            .await
            .roles
            .iter()
            .find(|role| &role.id == role_id)
            .cloned()
    }

    /// Returns whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.cache.read().await.pending_fetches > 0
    }

    /// Returns the message of the most recent failed fetch.
    pub async fn last_error(&self) -> Option<String> {
        self.cache.read().await.last_error.clone()
    }

    /// Builds a permission evaluator from the current cache.
    pub async fn evaluator_for(&self, user: Option<&SessionUser>) -> PermissionEvaluator {
        let cache = self.cache.read().await;
        PermissionEvaluator::new(user, cache.roles.as_slice())
    }

    async fn require_cached_role(&self, role_id: &RoleId) -> AppResult<Option<RoleDefinition>> {
        if role_id.as_str().trim().is_empty() {
            return Err(AppError::Validation("role id is required".to_owned()));
        }

        Ok(self.find_role(role_id).await)
    }
}
