//! User service tests against a live Redis.
//!
//! Each test returns early when no Redis is reachable (set REDIS_URL to point
//! somewhere else than redis://127.0.0.1:6379).

use dl_cache::{RedisCache, UserService, UserStore};
use dl_core::User;

async fn connect_cache(namespace: &str) -> Option<RedisCache> {
    let url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

    match RedisCache::connect(&url, namespace, 60).await {
        Ok(cache) => Some(cache),
        Err(e) => {
            eprintln!("skipping, no Redis reachable: {}", e);
            None
        }
    }
}

#[tokio::test]
async fn test_save_then_get_round_trips() {
    let Some(cache) = connect_cache("dl-test-round-trip").await else {
        return;
    };
    let service = UserService::new(UserStore::new(), cache);

    let saved = service.save_or_update(User::new(5, "u5", "p5")).await;
    let fetched = service.get(5).await;

    assert_eq!(fetched, Some(saved));

    service.delete(5).await;
}

#[tokio::test]
async fn test_get_populates_cache_from_store() {
    let Some(cache) = connect_cache("dl-test-populate").await else {
        return;
    };
    let cache_probe = cache.clone();
    let service = UserService::new(UserStore::seeded(), cache);

    // Nothing cached yet for a seeded user
    cache_probe.evict(1).await.unwrap();
    assert_eq!(cache_probe.fetch::<User>(1).await.unwrap(), None);

    let fetched = service.get(1).await.unwrap();
    assert_eq!(fetched.username, "u1");

    // The miss populated the cache
    let cached: Option<User> = cache_probe.fetch(1).await.unwrap();
    assert_eq!(cached, Some(fetched));

    cache_probe.evict(1).await.unwrap();
}

#[tokio::test]
async fn test_delete_evicts_cache_entry() {
    let Some(cache) = connect_cache("dl-test-evict").await else {
        return;
    };
    let cache_probe = cache.clone();
    let service = UserService::new(UserStore::new(), cache);

    service.save_or_update(User::new(7, "u7", "p7")).await;
    assert!(cache_probe.fetch::<User>(7).await.unwrap().is_some());

    let removed = service.delete(7).await;

    assert_eq!(removed.map(|user| user.id), Some(7));
    assert_eq!(cache_probe.fetch::<User>(7).await.unwrap(), None);
    assert_eq!(service.get(7).await, None);
}

#[tokio::test]
async fn test_get_unknown_user_is_none() {
    let Some(cache) = connect_cache("dl-test-unknown").await else {
        return;
    };
    let service = UserService::new(UserStore::seeded(), cache);

    assert_eq!(service.get(99).await, None);
}
