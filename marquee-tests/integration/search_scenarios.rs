//! End-to-end widget scenarios against a scripted catalog.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::config::WidgetConfig;
use marquee_core::test_fixtures::{ScriptedCatalog, batman_begins_detail, batman_results};
use marquee_core::widget::{DetailContent, ListContent, NO_MOVIES_TO_SORT};
use marquee_core::{SortKey, WidgetHandle, spawn_widget};

fn spawn(catalog: &Arc<ScriptedCatalog>) -> WidgetHandle {
    spawn_widget(catalog.clone(), &WidgetConfig::default(), None)
}

#[tokio::test(start_paused = true)]
async fn test_search_then_select_second_result() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(40))
            .with_detail(batman_begins_detail(), Duration::from_millis(40)),
    );
    let widget = spawn(&catalog);

    widget.input("bat").await.unwrap();
    // Past the debounce interval but before the 40ms search completes.
    tokio::time::sleep(Duration::from_millis(110)).await;
    assert_eq!(catalog.search_calls(), ["bat"]);
    assert_eq!(widget.view().await.unwrap().list.content, ListContent::Loading);
    tokio::time::sleep(Duration::from_millis(100)).await;

    let view = widget.view().await.unwrap();
    let listed: Vec<_> = view
        .list
        .entries()
        .iter()
        .map(|entry| format!("{} ({})", entry.title, entry.year))
        .collect();
    assert_eq!(listed, ["Batman (1989)", "Batman Begins (2005)"]);

    let second = view.list.entries()[1].id.clone();
    widget.select(second).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let view = widget.view().await.unwrap();
    assert!(!view.list.visible);
    assert_eq!(view.list.content, ListContent::Empty);
    assert!(view.input.text.is_empty());
    assert!(view.detail.visible);
    let DetailContent::Card(card) = &view.detail.content else {
        panic!("expected the detail card, got {:?}", view.detail.content);
    };
    assert_eq!(card.title, "Batman Begins");
    assert_eq!(card.released, "15 Jun 2005");
    assert_eq!(card.actors, "Christian Bale, Michael Caine, Ken Watanabe");

    // Sorting after a selection has nothing left to sort.
    widget.sort(SortKey::AToZ).await.unwrap();
    let view = widget.view().await.unwrap();
    assert_eq!(view.list.content, ListContent::Message(NO_MOVIES_TO_SORT.to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_unknown_term_keeps_spinner_and_sort_reports_no_movies() {
    let catalog = Arc::new(ScriptedCatalog::new());
    let widget = spawn(&catalog);

    widget.input("zzzznotreal").await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    let view = widget.view().await.unwrap();
    assert_eq!(catalog.search_calls(), ["zzzznotreal"]);
    assert!(view.list.visible);
    assert_eq!(view.list.content, ListContent::Loading);
    assert!(view.list.entries().is_empty());

    widget.sort(SortKey::AToZ).await.unwrap();

    let view = widget.view().await.unwrap();
    assert!(view.list.visible);
    assert_eq!(
        view.list.content,
        ListContent::Message(NO_MOVIES_TO_SORT.to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_sort_switches_are_based_on_fetch_order() {
    let catalog = Arc::new(ScriptedCatalog::new().with_matches(
        "bat",
        batman_results(),
        Duration::ZERO,
    ));
    let widget = spawn(&catalog);
    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let first_title = |view: marquee_core::WidgetView| view.list.entries()[0].title.clone();

    widget.sort(SortKey::NewestToOldest).await.unwrap();
    assert_eq!(first_title(widget.view().await.unwrap()), "Batman Begins");

    widget.sort(SortKey::ZToA).await.unwrap();
    assert_eq!(first_title(widget.view().await.unwrap()), "Batman Begins");

    widget
        .sort(SortKey::Unrecognized("Insertion".to_string()))
        .await
        .unwrap();
    assert_eq!(first_title(widget.view().await.unwrap()), "Batman");
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_detail_hides_everything() {
    let catalog = Arc::new(
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::ZERO)
            .with_detail(batman_begins_detail(), Duration::ZERO),
    );
    let widget = spawn(&catalog);
    widget.input("bat").await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    widget
        .select(batman_results()[1].id.clone())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    widget.reset().await.unwrap();

    let view = widget.view().await.unwrap();
    assert!(!view.detail.visible);
    assert!(!view.list.visible);
    assert!(view.input.text.is_empty());
}
