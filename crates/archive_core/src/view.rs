//! crates/archive_core/src/view.rs
//!
//! Pure renderers that turn application state into a serializable display tree.
//! Every interactive node carries the `Action` the UI layer sends back when
//! the user activates it.

use crate::app::{Action, NewsApp};
use crate::cache::{CachedWeather, FeedCache};
use crate::domain::{Article, Category, QuakeRecord, ViewState};
use crate::format;
use crate::location::CURRENT_LOCATION_LABEL;
use crate::repository::{self, find_by_id};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

pub const EMPTY_GRID_MESSAGE: &str = "記事が見つかりませんでした";
pub const NO_QUAKES_MESSAGE: &str = "最近の地震情報はありません";
pub const NO_POINTS_MESSAGE: &str = "震度観測データはありません";
pub const WEATHER_PENDING: &str = "取得中...";
pub const RECENT_LIMIT: usize = 8;
const EXAM_TAG: &str = "受験対策";

//=========================================================================================
// Display tree
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub header: Header,
    pub content: Content,
    pub scroll_to_top: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Header {
    pub clock: String,
    pub weather: HeaderWeather,
    pub logo: Action,
    pub nav: Vec<NavLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum HeaderWeather {
    Pending { text: String },
    Ready { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub label: String,
    pub active: bool,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Content {
    Listing { grid: ArticleGrid, sidebar: Sidebar },
    ArticleDetail(ArticleDetailView),
    QuakeDetail(QuakeDetailView),
    /// The requested article does not exist; only a way back is offered.
    Missing { back: Action },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ArticleGrid {
    Cards { cards: Vec<ArticleCard> },
    Empty { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleCard {
    pub id: String,
    pub title: String,
    pub is_new: bool,
    pub excerpt: String,
    pub tags: Vec<TagView>,
    pub category: String,
    pub time: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagView {
    pub label: String,
    pub exam: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sidebar {
    pub recent: Vec<SidebarItem>,
    pub weather: WeatherWidget,
    pub quakes: QuakeWidget,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    pub id: String,
    pub title: String,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WeatherWidget {
    PermissionPrompt {
        action: Action,
    },
    Ready {
        label: String,
        icon: String,
        temperature: String,
        /// Offered until the forecast is for the user's own position.
        locate: Option<Action>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuakeWidget {
    Loading,
    NoEvents { message: String },
    Events { items: Vec<QuakeItem> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeItem {
    pub index: usize,
    pub time: String,
    pub place: String,
    pub intensity: String,
    pub level: format::IntensityLevel,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleDetailView {
    pub id: String,
    pub category: String,
    pub title: String,
    pub author: String,
    pub published: String,
    pub image: String,
    pub blocks: Vec<Block>,
    pub keywords: Vec<String>,
    pub back: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Paragraph { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuakeDetailView {
    pub title: String,
    pub time: String,
    pub max_intensity: String,
    pub magnitude: String,
    pub depth: String,
    pub position: String,
    pub tsunami: String,
    pub regions: Vec<RegionGroup>,
    pub no_points_message: Option<String>,
    pub issue_source: String,
    pub issue_time: String,
    pub issue_kind: String,
    pub back: Action,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGroup {
    pub pref: String,
    pub points: Vec<PointView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointView {
    pub addr: String,
    pub intensity: String,
}

/// A partial re-render of one feed widget, applied in place by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetUpdate {
    Quakes {
        quakes: QuakeWidget,
    },
    Weather {
        header: HeaderWeather,
        /// `None` when the current view has no sidebar.
        sidebar: Option<WeatherWidget>,
    },
}

//=========================================================================================
// Renderers
//=========================================================================================

pub fn render_page(app: &NewsApp, now: DateTime<Local>, scroll_to_top: bool) -> Page {
    let now = now.naive_local();
    let content = match app.view() {
        ViewState::Home | ViewState::Category(_) => Content::Listing {
            grid: render_grid(&app.displayed_articles(), now),
            sidebar: render_sidebar(app.articles(), app.cache()),
        },
        ViewState::ArticleDetail(id) => match find_by_id(app.articles(), id) {
            Some(article) => Content::ArticleDetail(render_article_detail(article)),
            None => Content::Missing { back: Action::Back },
        },
        ViewState::QuakeDetail(quake) => Content::QuakeDetail(render_quake_detail(quake)),
    };

    Page {
        header: render_header(app.view(), app.cache(), now),
        content,
        scroll_to_top,
    }
}

pub fn render_header(view: &ViewState, cache: &FeedCache, now: NaiveDateTime) -> Header {
    let active = match view {
        ViewState::Category(c) => Some(*c),
        _ => None,
    };
    let mut nav = vec![NavLink {
        label: "トップ".to_string(),
        active: *view == ViewState::Home,
        action: Action::Home,
    }];
    nav.extend(Category::ALL.into_iter().map(|category| NavLink {
        label: category.label().to_string(),
        active: active == Some(category),
        action: Action::SelectCategory { category },
    }));

    Header {
        clock: format::format_clock(now),
        weather: header_weather(cache.weather.get()),
        logo: Action::Home,
        nav,
    }
}

pub fn header_weather(weather: Option<&CachedWeather>) -> HeaderWeather {
    match weather {
        Some(w) => HeaderWeather::Ready {
            text: format!(
                "{}: {} {}℃",
                w.location.label,
                format::weather_icon(w.snapshot.weather_code),
                format::format_temperature(w.snapshot.temperature)
            ),
        },
        None => HeaderWeather::Pending {
            text: WEATHER_PENDING.to_string(),
        },
    }
}

pub fn render_grid(articles: &[Article], now: NaiveDateTime) -> ArticleGrid {
    if articles.is_empty() {
        return ArticleGrid::Empty {
            message: EMPTY_GRID_MESSAGE.to_string(),
        };
    }
    let cards = articles
        .iter()
        .map(|article| ArticleCard {
            id: article.id.clone(),
            title: article.title.clone(),
            is_new: repository::is_new(article, now),
            excerpt: article.content.clone(),
            tags: article
                .tags
                .iter()
                .map(|tag| TagView {
                    label: tag.clone(),
                    exam: tag == EXAM_TAG,
                })
                .collect(),
            category: article.category.label().to_string(),
            time: article.time.format("%H:%M").to_string(),
            action: Action::SelectArticle {
                id: article.id.clone(),
            },
        })
        .collect();
    ArticleGrid::Cards { cards }
}

pub fn render_sidebar(articles: &[Article], cache: &FeedCache) -> Sidebar {
    let recent = repository::recent_first(articles)
        .into_iter()
        .take(RECENT_LIMIT)
        .map(|article| SidebarItem {
            action: Action::SelectArticle {
                id: article.id.clone(),
            },
            id: article.id,
            title: article.title,
        })
        .collect();

    Sidebar {
        recent,
        weather: weather_widget(cache.weather.get()),
        quakes: quake_widget(cache.quakes.get()),
    }
}

pub fn weather_widget(weather: Option<&CachedWeather>) -> WeatherWidget {
    match weather {
        Some(w) => WeatherWidget::Ready {
            label: format!("{}の予報", w.location.label),
            icon: format::weather_icon(w.snapshot.weather_code).to_string(),
            temperature: format!("{}℃", format::format_temperature(w.snapshot.temperature)),
            locate: (w.location.label != CURRENT_LOCATION_LABEL).then_some(Action::RequestLocation),
        },
        None => WeatherWidget::PermissionPrompt {
            action: Action::RequestLocation,
        },
    }
}

/// `None` means nothing has been fetched yet.
pub fn quake_widget(quakes: Option<&Vec<QuakeRecord>>) -> QuakeWidget {
    match quakes {
        None => QuakeWidget::Loading,
        Some(list) if list.is_empty() => QuakeWidget::NoEvents {
            message: NO_QUAKES_MESSAGE.to_string(),
        },
        Some(list) => QuakeWidget::Events {
            items: list
                .iter()
                .enumerate()
                .map(|(index, q)| {
                    let place = match q.earthquake.hypocenter.name.as_str() {
                        "" => "不明".to_string(),
                        name => name.to_string(),
                    };
                    QuakeItem {
                        index,
                        time: format::format_feed_clock(&q.earthquake.time),
                        place,
                        intensity: format!("震度{}", format::format_intensity(q.earthquake.max_scale)),
                        level: format::IntensityLevel::from_scale(q.earthquake.max_scale),
                        action: Action::SelectQuake { index },
                    }
                })
                .collect(),
        },
    }
}

pub fn render_article_detail(article: &Article) -> ArticleDetailView {
    let blocks = article
        .content
        .split("\n\n")
        .map(|p| match p.strip_prefix("### ") {
            Some(heading) => Block::Heading {
                text: heading.to_string(),
            },
            None => Block::Paragraph {
                text: p.to_string(),
            },
        })
        .collect();

    ArticleDetailView {
        id: article.id.clone(),
        category: article.category.label().to_string(),
        title: article.title.clone(),
        author: article.author.clone(),
        published: format!(
            "{} {} 公開",
            format::format_publish_date(article.date),
            article.time.format("%H:%M")
        ),
        image: article.image.clone(),
        blocks,
        keywords: vec![
            format!("#{}", article.category.label()),
            "#ReflectionArchive".to_string(),
            "#知の探究".to_string(),
        ],
        back: Action::Back,
    }
}

pub fn render_quake_detail(quake: &QuakeRecord) -> QuakeDetailView {
    let eq = &quake.earthquake;

    // Group observation points by prefecture, keeping first-seen order.
    let mut regions: Vec<RegionGroup> = Vec::new();
    for point in &quake.points {
        let view = PointView {
            addr: point.addr.clone(),
            intensity: format!("震度{}", format::format_intensity(point.scale)),
        };
        match regions.iter_mut().find(|r| r.pref == point.pref) {
            Some(group) => group.points.push(view),
            None => regions.push(RegionGroup {
                pref: point.pref.clone(),
                points: vec![view],
            }),
        }
    }

    let title = match eq.hypocenter.name.as_str() {
        "" => "調査中".to_string(),
        name => name.to_string(),
    };

    QuakeDetailView {
        title,
        time: format::format_feed_datetime(&eq.time),
        max_intensity: format!("震度{}", format::format_intensity(eq.max_scale)),
        magnitude: format::format_magnitude(eq.hypocenter.magnitude),
        depth: format::format_depth(eq.hypocenter.depth),
        position: format!(
            "北緯{:.1}° / 東経{:.1}°",
            eq.hypocenter.latitude, eq.hypocenter.longitude
        ),
        tsunami: format::tsunami_label(&eq.domestic_tsunami),
        no_points_message: regions.is_empty().then(|| NO_POINTS_MESSAGE.to_string()),
        regions,
        issue_source: quake.issue.source.clone(),
        issue_time: quake.issue.time.clone(),
        issue_kind: quake.issue.kind.clone(),
        back: Action::Back,
    }
}

//=========================================================================================
// Interaction binding
//=========================================================================================

/// Every action reachable from a rendered page, in document order.
pub fn interactions(page: &Page) -> Vec<Action> {
    let mut actions = vec![page.header.logo.clone()];
    actions.extend(page.header.nav.iter().map(|link| link.action.clone()));

    match &page.content {
        Content::Listing { grid, sidebar } => {
            if let ArticleGrid::Cards { cards } = grid {
                actions.extend(cards.iter().map(|c| c.action.clone()));
            }
            match &sidebar.weather {
                WeatherWidget::PermissionPrompt { action } => actions.push(action.clone()),
                WeatherWidget::Ready { locate, .. } => actions.extend(locate.clone()),
            }
            actions.extend(quake_interactions(&sidebar.quakes));
            actions.extend(sidebar.recent.iter().map(|item| item.action.clone()));
        }
        Content::ArticleDetail(detail) => actions.push(detail.back.clone()),
        Content::QuakeDetail(detail) => actions.push(detail.back.clone()),
        Content::Missing { back } => actions.push(back.clone()),
    }
    actions
}

pub fn quake_interactions(widget: &QuakeWidget) -> Vec<Action> {
    match widget {
        QuakeWidget::Events { items } => items.iter().map(|i| i.action.clone()).collect(),
        QuakeWidget::Loading | QuakeWidget::NoEvents { .. } => Vec::new(),
    }
}
