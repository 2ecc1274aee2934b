use crate::cache::RedisCache;
use crate::store::UserStore;

use dl_core::User;

use log::{debug, info, warn};

/// Cache-aside user CRUD: the store is authoritative, Redis fronts reads.
pub struct UserService {
    store: UserStore,
    cache: RedisCache,
}

impl UserService {
    pub fn new(store: UserStore, cache: RedisCache) -> Self {
        Self { store, cache }
    }

    /// Write a user through to the store and refresh its cache entry
    pub async fn save_or_update(&self, mut user: User) -> User {
        user.touch();
        self.store.insert(user.clone()).await;

        if let Err(e) = self.cache.put(user.id, &user).await {
            warn!("Cache put failed for user {}: {}", user.id, e);
        }

        info!("Saved user {}", user.id);
        user
    }

    /// Look a user up, populating the cache on a store hit
    pub async fn get(&self, id: i64) -> Option<User> {
        match self.cache.fetch::<User>(id).await {
            Ok(Some(user)) => {
                debug!("Cache hit for user {}", id);
                return Some(user);
            }
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for user {}: {}", id, e),
        }

        let user = self.store.get(id).await?;

        if let Err(e) = self.cache.put(id, &user).await {
            warn!("Cache put failed for user {}: {}", id, e);
        }

        Some(user)
    }

    /// Remove a user from the store and evict its cache entry
    pub async fn delete(&self, id: i64) -> Option<User> {
        let removed = self.store.remove(id).await;

        if let Err(e) = self.cache.evict(id).await {
            warn!("Cache evict failed for user {}: {}", id, e);
        }

        info!("Deleted user {}", id);
        removed
    }
}
