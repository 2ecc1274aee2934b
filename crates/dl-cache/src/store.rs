use dl_core::User;

use std::collections::HashMap;

use tokio::sync::RwLock;

/// In-memory user store standing in for a real database.
pub struct UserStore {
    users: RwLock<HashMap<i64, User>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Store preloaded with the three fixture users
    pub fn seeded() -> Self {
        let mut users = HashMap::new();
        for (id, name, password) in [(1, "u1", "p1"), (2, "u2", "p2"), (3, "u3", "p3")] {
            users.insert(id, User::new(id, name, password));
        }

        Self {
            users: RwLock::new(users),
        }
    }

    /// Insert or replace; returns the previous record if any
    pub async fn insert(&self, user: User) -> Option<User> {
        self.users.write().await.insert(user.id, user)
    }

    pub async fn get(&self, id: i64) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn remove(&self, id: i64) -> Option<User> {
        self.users.write().await.remove(&id)
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::UserStore;

    use dl_core::User;

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = UserStore::new();

        assert!(store.is_empty().await);
        assert_eq!(store.get(1).await, None);
    }

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = UserStore::new();
        let user = User::new(5, "u5", "p5");

        assert_eq!(store.insert(user.clone()).await, None);
        assert_eq!(store.get(5).await, Some(user.clone()));
        assert_eq!(store.remove(5).await, Some(user));
        assert_eq!(store.get(5).await, None);
    }

    #[tokio::test]
    async fn test_insert_replaces_existing() {
        let store = UserStore::new();
        let first = User::new(5, "u5", "p5");
        let second = User::new(5, "u5", "changed");

        store.insert(first.clone()).await;
        let replaced = store.insert(second.clone()).await;

        assert_eq!(replaced, Some(first));
        assert_eq!(store.get(5).await, Some(second));
    }

    #[tokio::test]
    async fn test_seeded_store_has_fixture_users() {
        let store = UserStore::seeded();

        assert_eq!(store.len().await, 3);
        assert_eq!(store.get(1).await.unwrap().username, "u1");
        assert_eq!(store.get(2).await.unwrap().password, "p2");
        assert_eq!(store.get(3).await.unwrap().username, "u3");
    }
}
