use archive_core::repository::{filter_by_category, find_by_id, recent_first};
use archive_core::{ArticleRepository, ArticleSource, Category, PortError, PortResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

/// Serves sources from memory; names absent from `files` fail to fetch.
struct InMemorySource {
    manifest: Option<Vec<String>>,
    files: HashMap<String, String>,
}

#[async_trait]
impl ArticleSource for InMemorySource {
    async fn fetch_manifest(&self) -> PortResult<Vec<String>> {
        self.manifest
            .clone()
            .ok_or_else(|| PortError::Unavailable("index.json".to_string()))
    }

    async fn fetch_source(&self, name: &str) -> PortResult<String> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| PortError::NotFound(name.to_string()))
    }
}

fn markdown(id: &str, category: &str, date: &str, time: &str) -> String {
    format!(
        "---\nid: {id}\ntitle: {id} title\ncategory: {category}\ndate: {date}\ntime: {time}\nauthor: Desk\n---\nBody of {id}."
    )
}

fn source(manifest: &[&str], files: &[(&str, String)]) -> Arc<dyn ArticleSource> {
    Arc::new(InMemorySource {
        manifest: Some(manifest.iter().map(|s| s.to_string()).collect()),
        files: files
            .iter()
            .map(|(name, body)| (name.to_string(), body.clone()))
            .collect(),
    })
}

#[tokio::test]
async fn one_failing_source_is_dropped_and_load_succeeds() {
    let repo = ArticleRepository::new(source(
        &["a.md", "missing.md", "c.json"],
        &[
            ("a.md", markdown("a", "自然科学", "2025-01-01", "10:00")),
            (
                "c.json",
                r#"{"id":"c","title":"C","category":"科学哲学","date":"2025-01-03",
                    "time":"07:00:00","author":"Desk"}"#
                    .to_string(),
            ),
        ],
    ));

    let articles = repo.load().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, "a");
    assert_eq!(articles[1].id, "c");
}

#[tokio::test]
async fn unparseable_sources_are_dropped() {
    let repo = ArticleRepository::new(source(
        &["good.md", "bad.md"],
        &[
            ("good.md", markdown("good", "先端技術", "2025-01-01", "10:00")),
            ("bad.md", markdown("bad", "料理", "2025-01-01", "10:00")),
        ],
    ));
    let articles = repo.load().await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, "good");
}

#[tokio::test]
async fn manifest_failure_is_fatal() {
    let repo = ArticleRepository::new(Arc::new(InMemorySource {
        manifest: None,
        files: HashMap::new(),
    }));
    assert!(matches!(repo.load().await, Err(PortError::Unavailable(_))));
}

#[tokio::test]
async fn lookups_are_total_and_recent_order_is_stable() {
    let repo = ArticleRepository::new(source(
        &["old.md", "tie1.md", "new.md", "tie2.md"],
        &[
            ("old.md", markdown("old", "自然科学", "2024-12-31", "23:59")),
            ("tie1.md", markdown("tie1", "社会工学", "2025-01-02", "09:00")),
            ("new.md", markdown("new", "社会工学", "2025-01-05", "08:00")),
            ("tie2.md", markdown("tie2", "芸術工学", "2025-01-02", "09:00")),
        ],
    ));
    let articles = repo.load().await.unwrap();

    let ids: Vec<_> = recent_first(&articles).into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["new", "tie1", "tie2", "old"]);

    assert_eq!(filter_by_category(&articles, Category::SocialEngineering).len(), 2);
    assert!(filter_by_category(&articles, Category::MathLogic).is_empty());
    assert!(find_by_id(&articles, "nope").is_none());
    assert_eq!(find_by_id(&articles, "old").map(|a| a.title.as_str()), Some("old title"));
}
