//! crates/archive_core/src/repository.rs
//!
//! Loads the article list from an `ArticleSource` and offers pure lookups over it.

use crate::domain::{Article, Category};
use crate::ports::{ArticleSource, PortError, PortResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use futures::future::join_all;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};

/// Loads articles through an `ArticleSource`.
#[derive(Clone)]
pub struct ArticleRepository {
    source: Arc<dyn ArticleSource>,
}

impl ArticleRepository {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self { source }
    }

    /// Fetches the manifest, then every listed source.
    ///
    /// Only a manifest failure is returned as an error. A source that cannot be
    /// fetched or parsed is logged and dropped; the rest keep manifest order.
    pub async fn load(&self) -> PortResult<Vec<Article>> {
        let names = self.source.fetch_manifest().await?;
        info!("Article manifest lists {} sources.", names.len());

        let fetches = names.iter().map(|name| async move {
            let raw = self.source.fetch_source(name).await?;
            parse_article(name, &raw)
        });

        let articles: Vec<Article> = join_all(fetches)
            .await
            .into_iter()
            .zip(&names)
            .filter_map(|(result, name)| match result {
                Ok(article) => Some(article),
                Err(e) => {
                    warn!("Dropping article source {}: {}", name, e);
                    None
                }
            })
            .collect();

        info!("Loaded {} of {} articles.", articles.len(), names.len());
        Ok(articles)
    }
}

//=========================================================================================
// Parsing
//=========================================================================================

/// Parses one article source. `*.md` sources are text with an optional front
/// matter header; anything else is a JSON record.
pub fn parse_article(name: &str, raw: &str) -> PortResult<Article> {
    if name.ends_with(".md") {
        parse_markdown_article(name, raw)
    } else {
        serde_json::from_str(raw).map_err(|e| PortError::Parse(name.to_string(), e.to_string()))
    }
}

fn front_matter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^---\s*\r?\n([\s\S]*?)\r?\n---\s*\r?\n([\s\S]*)$")
            .expect("front matter pattern is valid")
    })
}

/// Splits a document into its `key: value` header and body.
/// A document without a header has an empty map and is all body.
pub fn split_front_matter(text: &str) -> (HashMap<String, String>, &str) {
    let Some(caps) = front_matter_regex().captures(text) else {
        return (HashMap::new(), text);
    };
    let header = caps.get(1).map_or("", |m| m.as_str());
    let body = caps.get(2).map_or("", |m| m.as_str());

    let fields = header
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), unquote(value.trim()).to_string()))
        })
        .collect();
    (fields, body)
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

fn parse_tags(value: &str) -> Vec<String> {
    value
        .trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|tag| unquote(tag.trim()).trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn parse_markdown_article(name: &str, raw: &str) -> PortResult<Article> {
    let (fields, body) = split_front_matter(raw);
    let parse_err = |msg: String| PortError::Parse(name.to_string(), msg);
    let required = |key: &str| {
        fields
            .get(key)
            .cloned()
            .ok_or_else(|| parse_err(format!("missing field `{}`", key)))
    };
    let optional = |key: &str| fields.get(key).cloned().unwrap_or_default();

    let category = required("category")?
        .parse::<Category>()
        .map_err(|e| parse_err(e.to_string()))?;
    let date = NaiveDate::parse_from_str(&required("date")?, "%Y-%m-%d")
        .map_err(|e| parse_err(format!("bad date: {}", e)))?;
    let time = parse_time(&required("time")?).map_err(|e| parse_err(format!("bad time: {}", e)))?;

    Ok(Article {
        id: required("id")?,
        title: required("title")?,
        category,
        date,
        time,
        author: optional("author"),
        summary: optional("summary"),
        content: body.to_string(),
        image: optional("image"),
        tags: fields.get("tags").map(|t| parse_tags(t)).unwrap_or_default(),
    })
}

fn parse_time(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

//=========================================================================================
// Lookups
//=========================================================================================

pub fn filter_by_category(articles: &[Article], category: Category) -> Vec<Article> {
    articles
        .iter()
        .filter(|a| a.category == category)
        .cloned()
        .collect()
}

pub fn find_by_id<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}

/// All articles, newest first. Ties keep their input order.
pub fn recent_first(articles: &[Article]) -> Vec<Article> {
    let mut sorted = articles.to_vec();
    sorted.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    sorted
}

/// Published within the last 24 hours, and not in the future.
pub fn is_new(article: &Article, now: NaiveDateTime) -> bool {
    let age = now - article.published_at();
    age > Duration::zero() && age < Duration::hours(24)
}
