use archive_core::domain::{Earthquake, Hypocenter};
use archive_core::location::{FALLBACK_COORDINATES, FALLBACK_LABEL};
use archive_core::view::{
    interactions, quake_interactions, ArticleGrid, Content, HeaderWeather, QuakeWidget,
    WeatherWidget, EMPTY_GRID_MESSAGE, NO_QUAKES_MESSAGE,
};
use archive_core::{
    Action, Article, Category, Coordinates, FeedEvent, FeedOutcome, NewsApp, QuakeRecord,
    RefreshRequest, ViewState, WeatherLocation, WeatherSnapshot, WidgetUpdate,
};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

fn now() -> DateTime<Local> {
    Local.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
}

fn article(id: &str, category: Category, day: u32) -> Article {
    Article {
        id: id.to_string(),
        title: format!("Title {id}"),
        category,
        date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
        time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        author: "Desk".to_string(),
        summary: String::new(),
        content: "First.\n\n### Section\n\nSecond.".to_string(),
        image: "img.png".to_string(),
        tags: vec!["受験対策".to_string()],
    }
}

fn articles() -> Vec<Article> {
    vec![
        article("n1", Category::NaturalScience, 1),
        article("m1", Category::MathLogic, 3),
        article("n2", Category::NaturalScience, 2),
    ]
}

fn quake(name: &str) -> QuakeRecord {
    QuakeRecord {
        earthquake: Earthquake {
            time: "2025/03/01 11:42:00".to_string(),
            hypocenter: Hypocenter {
                name: name.to_string(),
                ..Default::default()
            },
            max_scale: 30,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn snapshot(temperature: f64, weather_code: i32) -> WeatherSnapshot {
    WeatherSnapshot {
        coordinates: FALLBACK_COORDINATES,
        temperature,
        weather_code,
        fetched_at: Utc.with_ymd_and_hms(2025, 3, 1, 3, 0, 0).unwrap(),
    }
}

fn started() -> NewsApp {
    let mut app = NewsApp::new(articles());
    app.start(now());
    app
}

#[test]
fn each_transition_lands_in_its_target_view() {
    let mut app = started();
    let cases = vec![
        (
            Action::SelectCategory { category: Category::MathLogic },
            ViewState::Category(Category::MathLogic),
        ),
        (Action::SelectArticle { id: "n2".into() }, ViewState::ArticleDetail("n2".into())),
        (Action::Back, ViewState::Home),
        (
            Action::SelectCategory { category: Category::NaturalScience },
            ViewState::Category(Category::NaturalScience),
        ),
        (Action::Home, ViewState::Home),
    ];
    for (action, expected) in cases {
        let effects = app.dispatch(action, now());
        assert_eq!(app.view(), &expected);
        assert!(effects.page.is_some());
        assert!(effects.page.unwrap().scroll_to_top);
    }
}

#[test]
fn category_view_shows_exactly_that_category() {
    let mut app = started();
    for category in Category::ALL {
        let effects = app.dispatch(Action::SelectCategory { category }, now());
        let expected: Vec<String> = articles()
            .into_iter()
            .filter(|a| a.category == category)
            .map(|a| a.id)
            .collect();

        let Content::Listing { grid, .. } = effects.page.unwrap().content else {
            panic!("category view must be a listing");
        };
        match grid {
            ArticleGrid::Cards { cards } => {
                let ids: Vec<String> = cards.into_iter().map(|c| c.id).collect();
                assert_eq!(ids, expected);
            }
            ArticleGrid::Empty { message } => {
                assert!(expected.is_empty());
                assert_eq!(message, EMPTY_GRID_MESSAGE);
            }
        }
    }
}

#[test]
fn sidebar_lists_recent_articles_newest_first() {
    let mut app = NewsApp::new(articles());
    let page = app.start(now()).page.unwrap();
    let Content::Listing { sidebar, .. } = page.content else {
        panic!("home must be a listing");
    };
    let ids: Vec<String> = sidebar.recent.into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["m1", "n2", "n1"]);
}

#[test]
fn repeated_identical_quake_fetches_are_idempotent() {
    let mut app = started();
    let list = vec![quake("能登半島沖"), quake("千葉県東方沖")];

    app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(list.clone())), now());
    let once = app.cache().quakes.get().cloned();
    for _ in 0..3 {
        app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(list.clone())), now());
    }
    assert_eq!(app.cache().quakes.get().cloned(), once);
    assert_eq!(once, Some(list));
}

#[test]
fn failed_refresh_leaves_cache_untouched() {
    let mut app = started();
    app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(vec![quake("A")])), now());
    app.apply_feed(
        FeedEvent::Weather {
            location: WeatherLocation::startup_default(),
            outcome: FeedOutcome::Available(snapshot(18.0, 0)),
        },
        now(),
    );
    let before = app.cache().clone();

    let quake_update = app.apply_feed(FeedEvent::Quakes(FeedOutcome::Unavailable), now());
    let weather_update = app.apply_feed(
        FeedEvent::Weather {
            location: WeatherLocation::fallback(),
            outcome: FeedOutcome::Unavailable,
        },
        now(),
    );

    assert_eq!(app.cache(), &before);
    assert!(quake_update.is_none());
    assert!(weather_update.is_none());
}

#[test]
fn missing_article_renders_a_defined_empty_state() {
    let mut app = started();
    let effects = app.dispatch(Action::SelectArticle { id: "ghost".into() }, now());
    assert_eq!(app.view(), &ViewState::ArticleDetail("ghost".into()));
    let page = effects.page.unwrap();
    assert_eq!(page.content, Content::Missing { back: Action::Back });
    assert!(interactions(&page).contains(&Action::Back));
}

#[test]
fn empty_quake_feed_shows_placeholder_and_offers_no_selection() {
    let mut app = started();
    let update = app
        .apply_feed(FeedEvent::Quakes(FeedOutcome::Available(Vec::new())), now())
        .unwrap();
    let WidgetUpdate::Quakes { quakes } = update else {
        panic!("expected a quake widget update");
    };
    assert_eq!(
        quakes,
        QuakeWidget::NoEvents { message: NO_QUAKES_MESSAGE.to_string() }
    );
    assert!(quake_interactions(&quakes).is_empty());

    let page = app.dispatch(Action::Home, now()).page.unwrap();
    assert!(!interactions(&page)
        .iter()
        .any(|a| matches!(a, Action::SelectQuake { .. })));
    assert_eq!(app.dispatch(Action::SelectQuake { index: 0 }, now()).page, None);
}

#[test]
fn quake_selection_enters_detail_with_the_cached_record() {
    let mut app = started();
    let list = vec![quake("A"), quake("B")];
    app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(list.clone())), now());

    let effects = app.dispatch(Action::SelectQuake { index: 1 }, now());
    assert_eq!(app.view(), &ViewState::QuakeDetail(list[1].clone()));
    assert!(matches!(effects.page.unwrap().content, Content::QuakeDetail(_)));
}

#[test]
fn fallback_weather_renders_icon_and_literal_temperature() {
    let mut app = started();
    let update = app
        .apply_feed(
            FeedEvent::Weather {
                location: WeatherLocation::startup_default(),
                outcome: FeedOutcome::Available(snapshot(21.5, 1)),
            },
            now(),
        )
        .unwrap();

    let WidgetUpdate::Weather { header, sidebar } = update else {
        panic!("expected a weather update");
    };
    let HeaderWeather::Ready { text } = header else {
        panic!("header weather should be ready");
    };
    assert!(text.contains("🌤️"));
    assert!(text.contains("21.5"));

    let Some(WeatherWidget::Ready { icon, temperature, .. }) = sidebar else {
        panic!("sidebar weather should be ready on home");
    };
    assert!(icon.contains("🌤️"));
    assert!(temperature.contains("21.5"));
}

#[test]
fn denied_location_uses_labelled_fallback() {
    let mut app = started();
    let prompt = app.dispatch(Action::RequestLocation, now());
    assert!(prompt.prompt_location);

    let effects = app.dispatch(Action::LocationDenied, now());
    let [RefreshRequest::Weather(location)] = effects.refresh.as_slice() else {
        panic!("expected a single weather refresh");
    };
    assert_eq!(location.coordinates, FALLBACK_COORDINATES);
    assert_eq!(location.label, FALLBACK_LABEL);
    assert_ne!(location.label, WeatherLocation::current(FALLBACK_COORDINATES).label);

    let update = app.apply_feed(
        FeedEvent::Weather {
            location: location.clone(),
            outcome: FeedOutcome::Available(snapshot(10.0, 61)),
        },
        now(),
    );
    let Some(WidgetUpdate::Weather { header: HeaderWeather::Ready { text }, .. }) = update else {
        panic!("expected a ready header");
    };
    assert!(text.starts_with(FALLBACK_LABEL));

    // Later listing entries keep refreshing the fallback, not the startup default.
    let home = app.dispatch(Action::Home, now());
    assert!(home
        .refresh
        .contains(&RefreshRequest::Weather(WeatherLocation::fallback())));
}

#[test]
fn late_feed_results_only_update_cache_on_detail_views() {
    let mut app = started();
    app.dispatch(Action::SelectArticle { id: "n1".into() }, now());

    let quakes = app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(vec![quake("A")])), now());
    assert!(quakes.is_none());
    assert_eq!(app.cache().quakes.get().map(Vec::len), Some(1));

    let weather = app.apply_feed(
        FeedEvent::Weather {
            location: WeatherLocation::current(Coordinates { latitude: 1.0, longitude: 2.0 }),
            outcome: FeedOutcome::Available(snapshot(5.0, 71)),
        },
        now(),
    );
    let Some(WidgetUpdate::Weather { sidebar, .. }) = weather else {
        panic!("header weather is always present");
    };
    assert!(sidebar.is_none());
}

#[test]
fn cached_feeds_render_immediately_on_reentry() {
    let mut app = started();
    app.apply_feed(FeedEvent::Quakes(FeedOutcome::Available(vec![quake("A")])), now());
    app.dispatch(Action::SelectArticle { id: "n1".into() }, now());

    let effects = app.dispatch(Action::Back, now());
    let Content::Listing { sidebar, .. } = effects.page.unwrap().content else {
        panic!("home must be a listing");
    };
    assert!(matches!(sidebar.quakes, QuakeWidget::Events { ref items } if items.len() == 1));
    assert!(effects.refresh.contains(&RefreshRequest::Quakes));
}
