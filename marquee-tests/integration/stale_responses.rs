//! Out-of-order catalog responses never overwrite a newer render.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::config::WidgetConfig;
use marquee_core::test_fixtures::{ScriptedCatalog, ViewRecorder, batman_results, candidate};
use marquee_core::widget::{DetailContent, ListContent};
use marquee_core::{Detail, MovieId, Poster, spawn_widget};

fn titles(content: &ListContent) -> Vec<String> {
    match content {
        ListContent::Candidates(entries) => entries.iter().map(|e| e.title.clone()).collect(),
        _ => Vec::new(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_search_does_not_overwrite_newer_results() {
    let alien = vec![candidate("tt0078748", "Alien", "1979", Poster::Missing)];
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(800))
            .with_matches("alien", alien, Duration::from_millis(20)),
    );
    let recorder = ViewRecorder::new();
    let widget = spawn_widget(
        catalog.clone(),
        &WidgetConfig::default(),
        Some(Box::new(recorder.clone())),
    );

    // A is issued at 100ms and resolves at 900ms.
    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    // B is issued at 250ms and resolves at 270ms.
    widget.input("alien").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    assert_eq!(catalog.search_calls(), ["bat", "alien"]);
    let view = widget.view().await.unwrap();
    assert_eq!(titles(&view.list.content), ["Alien"]);

    let rendered_batman = recorder
        .views()
        .iter()
        .any(|view| titles(&view.list.content).contains(&"Batman".to_string()));
    assert!(!rendered_batman, "stale search response reached the view");
}

#[tokio::test(start_paused = true)]
async fn test_focus_search_supersedes_in_flight_search() {
    let catalog = Arc::new(ScriptedCatalog::new().with_matches(
        "bat",
        batman_results(),
        Duration::from_millis(300),
    ));
    let widget = spawn_widget(catalog.clone(), &WidgetConfig::default(), None);

    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    widget.focus().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    // The first response has arrived but belongs to the superseded search.
    let view = widget.view().await.unwrap();
    assert_eq!(view.list.content, ListContent::Loading);

    tokio::time::sleep(Duration::from_millis(200)).await;
    let view = widget.view().await.unwrap();
    assert_eq!(titles(&view.list.content), ["Batman", "Batman Begins"]);
    assert_eq!(catalog.search_calls(), ["bat", "bat"]);
}

#[tokio::test(start_paused = true)]
async fn test_slow_earlier_detail_does_not_replace_newer_selection() {
    let first = Detail {
        id: MovieId::new("tt0096895"),
        title: "Batman".to_string(),
        ..Detail::default()
    };
    let second = Detail {
        id: MovieId::new("tt0372784"),
        title: "Batman Begins".to_string(),
        ..Detail::default()
    };
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::ZERO)
            .with_detail(first, Duration::from_millis(900))
            .with_detail(second, Duration::from_millis(10)),
    );
    let widget = spawn_widget(catalog.clone(), &WidgetConfig::default(), None);

    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    widget.select(MovieId::new("tt0096895")).await.unwrap();

    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    widget.select(MovieId::new("tt0372784")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1000)).await;

    let view = widget.view().await.unwrap();
    let DetailContent::Card(card) = &view.detail.content else {
        panic!("expected a detail card, got {:?}", view.detail.content);
    };
    assert_eq!(card.title, "Batman Begins");
}
