use gem_concierge::message::Gem;
use gem_concierge::services::gem_cache::{GemCache, MAX_GEMS, parse_selection};

fn gem(name: &str) -> Gem {
    Gem {
        name: name.to_string(),
        photo_urls: vec![format!("https://photos.example/{name}.jpg")],
        address: "somewhere quiet".to_string(),
        rating: 4.5,
        review_count: 100,
    }
}

#[tokio::test]
async fn retrieval_is_one_based() {
    let cache = GemCache::new();
    cache
        .store("default", vec![gem("a"), gem("b"), gem("c")])
        .await;

    assert_eq!(cache.get("default", 1).await.unwrap().name, "a");
    assert_eq!(cache.get("default", 2).await.unwrap().name, "b");
    assert_eq!(cache.get("default", 3).await.unwrap().name, "c");
    assert!(cache.get("default", 0).await.is_none());
    assert!(cache.get("default", 4).await.is_none());
}

#[tokio::test]
async fn empty_cache_finds_nothing() {
    let cache = GemCache::new();
    assert!(cache.get("default", 1).await.is_none());
    assert_eq!(cache.len("default").await, 0);
    assert!(cache.is_empty("default").await);
}

#[tokio::test]
async fn store_replaces_wholesale() {
    let cache = GemCache::new();
    cache
        .store("default", vec![gem("a"), gem("b"), gem("c")])
        .await;
    cache.store("default", vec![gem("x")]).await;

    assert_eq!(cache.len("default").await, 1);
    assert_eq!(cache.get("default", 1).await.unwrap().name, "x");
    assert!(cache.get("default", 2).await.is_none());
}

#[tokio::test]
async fn store_truncates_to_capacity() {
    let cache = GemCache::new();
    let stored = cache
        .store(
            "default",
            vec![gem("a"), gem("b"), gem("c"), gem("d"), gem("e")],
        )
        .await;
    assert_eq!(stored, MAX_GEMS);
    assert!(cache.get("default", 4).await.is_none());
}

#[tokio::test]
async fn sessions_are_isolated() {
    let cache = GemCache::new();
    cache.store("tab-1", vec![gem("a")]).await;
    assert!(cache.get("tab-2", 1).await.is_none());
    assert!(cache.clear("tab-1").await);
    assert!(!cache.clear("tab-1").await);
    assert!(cache.get("tab-1", 1).await.is_none());
}

#[test]
fn selection_detection_is_exact() {
    assert_eq!(parse_selection("1"), Some(1));
    assert_eq!(parse_selection("  3\n"), Some(3));
    assert_eq!(parse_selection("4"), None);
    assert_eq!(parse_selection("12"), None);
    assert_eq!(parse_selection("one"), None);
    assert_eq!(parse_selection("I choose 2"), None);
    assert_eq!(parse_selection(""), None);
}
