//! crates/archive_core/src/app.rs
//!
//! The application controller: current view, feed cache and location
//! permission for one session, and the transition rules between views.
//!
//! Every method is synchronous. Network work is requested through `Effects`
//! and its result comes back through `apply_feed`, so all state changes happen
//! between the caller's suspension points.

use crate::cache::{CachedWeather, FeedCache};
use crate::domain::{Article, Category, Coordinates, QuakeRecord, ViewState, WeatherSnapshot};
use crate::location::{LocationPermission, WeatherLocation};
use crate::ports::FeedOutcome;
use crate::repository::{filter_by_category, find_by_id};
use crate::view::{self, Page, QuakeWidget, WidgetUpdate};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

//=========================================================================================
// Inputs and outputs
//=========================================================================================

/// A user gesture, as bound into the rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Home,
    Back,
    SelectCategory { category: Category },
    SelectArticle { id: String },
    /// Position in the quake list as last rendered.
    SelectQuake { index: usize },
    RequestLocation,
    LocationGranted { coordinates: Coordinates },
    LocationDenied,
}

/// A feed fetch the caller should start.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshRequest {
    Quakes,
    Weather(WeatherLocation),
}

/// A completed feed fetch handed back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    Quakes(FeedOutcome<Vec<QuakeRecord>>),
    Weather {
        location: WeatherLocation,
        outcome: FeedOutcome<WeatherSnapshot>,
    },
}

/// What the caller must do after a controller call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// A full re-render, replacing header and content.
    pub page: Option<Page>,
    pub refresh: Vec<RefreshRequest>,
    /// Ask the browser for geolocation permission.
    pub prompt_location: bool,
    /// The header was recreated; the clock task must be restarted.
    pub restart_clock: bool,
}

//=========================================================================================
// Controller
//=========================================================================================

pub struct NewsApp {
    articles: Vec<Article>,
    view: ViewState,
    cache: FeedCache,
    permission: LocationPermission,
    /// Location of the latest weather request that was not a granted position.
    weather_target: Option<WeatherLocation>,
}

impl NewsApp {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            view: ViewState::Home,
            cache: FeedCache::default(),
            permission: LocationPermission::Unknown,
            weather_target: None,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn cache(&self) -> &FeedCache {
        &self.cache
    }

    pub fn permission(&self) -> LocationPermission {
        self.permission
    }

    /// Articles for the main grid: all on Home, the category's on Category,
    /// none on detail views.
    pub fn displayed_articles(&self) -> Vec<Article> {
        match &self.view {
            ViewState::Home => self.articles.clone(),
            ViewState::Category(category) => filter_by_category(&self.articles, *category),
            ViewState::ArticleDetail(_) | ViewState::QuakeDetail(_) => Vec::new(),
        }
    }

    /// Renders Home for the first time and requests the initial feed fetches.
    pub fn start(&mut self, now: DateTime<Local>) -> Effects {
        info!("Starting portal session with {} articles.", self.articles.len());
        let mut effects = self.enter(ViewState::Home, now);
        if let Some(page) = effects.page.as_mut() {
            page.scroll_to_top = false;
        }
        effects
    }

    pub fn dispatch(&mut self, action: Action, now: DateTime<Local>) -> Effects {
        debug!(?action, "Dispatching action.");
        match action {
            Action::Home | Action::Back => self.enter(ViewState::Home, now),
            Action::SelectCategory { category } => self.enter(ViewState::Category(category), now),
            Action::SelectArticle { id } => {
                if find_by_id(&self.articles, &id).is_none() {
                    warn!("Article {} does not exist; rendering an empty detail view.", id);
                }
                self.enter(ViewState::ArticleDetail(id), now)
            }
            Action::SelectQuake { index } => {
                let selected = self.cache.quakes.get().and_then(|list| list.get(index)).cloned();
                match selected {
                    Some(quake) => self.enter(ViewState::QuakeDetail(quake), now),
                    None => {
                        warn!("Quake index {} is not in the cached list; ignoring.", index);
                        Effects::default()
                    }
                }
            }
            Action::RequestLocation => match self.permission {
                LocationPermission::Granted(coordinates) => Effects {
                    refresh: vec![RefreshRequest::Weather(WeatherLocation::current(coordinates))],
                    ..Effects::default()
                },
                LocationPermission::Unknown | LocationPermission::Denied => Effects {
                    prompt_location: true,
                    ..Effects::default()
                },
            },
            Action::LocationGranted { coordinates } => {
                info!("Location permission granted.");
                self.permission = LocationPermission::Granted(coordinates);
                Effects {
                    refresh: vec![RefreshRequest::Weather(WeatherLocation::current(coordinates))],
                    ..Effects::default()
                }
            }
            Action::LocationDenied => {
                info!("Location permission denied; using the fallback city.");
                self.permission = LocationPermission::Denied;
                let fallback = WeatherLocation::fallback();
                self.weather_target = Some(fallback.clone());
                Effects {
                    refresh: vec![RefreshRequest::Weather(fallback)],
                    ..Effects::default()
                }
            }
        }
    }

    /// Applies a finished fetch. A success always replaces the cache; the
    /// returned update is only produced for widgets the current view shows.
    pub fn apply_feed(&mut self, event: FeedEvent, now: DateTime<Local>) -> Option<WidgetUpdate> {
        let listing = self.view.shows_feed_widgets();
        match event {
            FeedEvent::Quakes(FeedOutcome::Available(quakes)) => {
                debug!("Caching {} quake records.", quakes.len());
                self.cache.quakes.store(quakes, now.with_timezone(&Utc));
                listing.then(|| WidgetUpdate::Quakes {
                    quakes: view::quake_widget(self.cache.quakes.get()),
                })
            }
            FeedEvent::Quakes(FeedOutcome::Unavailable) => {
                // Nothing cached to fall back on: stop showing the loading state.
                (listing && self.cache.quakes.get().is_none()).then(|| WidgetUpdate::Quakes {
                    quakes: QuakeWidget::NoEvents {
                        message: view::NO_QUAKES_MESSAGE.to_string(),
                    },
                })
            }
            FeedEvent::Weather {
                location,
                outcome: FeedOutcome::Available(snapshot),
            } => {
                let at = snapshot.fetched_at;
                self.cache.weather.store(CachedWeather { snapshot, location }, at);
                let cached = self.cache.weather.get();
                Some(WidgetUpdate::Weather {
                    header: view::header_weather(cached),
                    sidebar: listing.then(|| view::weather_widget(cached)),
                })
            }
            FeedEvent::Weather {
                outcome: FeedOutcome::Unavailable,
                ..
            } => None,
        }
    }

    /// Location used when a listing view refreshes the weather.
    pub fn weather_location(&self) -> WeatherLocation {
        match self.permission {
            LocationPermission::Granted(coordinates) => WeatherLocation::current(coordinates),
            LocationPermission::Unknown | LocationPermission::Denied => self
                .weather_target
                .clone()
                .unwrap_or_else(WeatherLocation::startup_default),
        }
    }

    fn enter(&mut self, next: ViewState, now: DateTime<Local>) -> Effects {
        self.view = next;
        let refresh = if self.view.shows_feed_widgets() {
            vec![
                RefreshRequest::Quakes,
                RefreshRequest::Weather(self.weather_location()),
            ]
        } else {
            Vec::new()
        };

        Effects {
            page: Some(view::render_page(self, now, true)),
            refresh,
            prompt_location: false,
            restart_clock: true,
        }
    }
}
