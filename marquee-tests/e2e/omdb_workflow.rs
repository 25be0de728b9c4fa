//! Search, select and failure workflows over HTTP.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use marquee_core::config::{CatalogConfig, WidgetConfig};
use marquee_core::widget::{DetailContent, ListContent, WidgetHandle, WidgetView};
use marquee_core::{MovieId, PLACEHOLDER_POSTER, spawn_widget};
use marquee_search::OmdbCatalog;
use parking_lot::Mutex;
use serde_json::json;

type RequestLog = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn fake_omdb(
    State(log): State<RequestLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    log.lock().push(params.clone());

    if let Some(term) = params.get("s") {
        return match term.as_str() {
            "bat" => Json(json!({
                "Search": [
                    {"Title": "Batman", "Year": "1989", "imdbID": "tt0096895", "Type": "movie",
                     "Poster": "https://img.example/batman.jpg"},
                    {"Title": "Batman Begins", "Year": "2005", "imdbID": "tt0372784",
                     "Type": "movie", "Poster": "N/A"}
                ],
                "totalResults": "2",
                "Response": "True"
            }))
            .into_response(),
            "boom" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
            _ => Json(json!({"Response": "False", "Error": "Movie not found!"})).into_response(),
        };
    }

    match params.get("i").map(String::as_str) {
        Some("tt0372784") => Json(json!({
            "Title": "Batman Begins",
            "Year": "2005",
            "Rated": "PG-13",
            "Released": "15 Jun 2005",
            "Genre": "Action, Crime, Drama",
            "Writer": "Bob Kane, David S. Goyer, Christopher Nolan",
            "Actors": "Christian Bale, Michael Caine, Ken Watanabe",
            "Plot": "After witnessing his parents' death, Bruce learns the art of fighting.",
            "Language": "English, Mandarin",
            "Awards": "Nominated for 1 Oscar.",
            "Poster": "N/A",
            "imdbID": "tt0372784",
            "Response": "True"
        }))
        .into_response(),
        _ => Json(json!({"Response": "False", "Error": "Incorrect IMDb ID."})).into_response(),
    }
}

async fn start_fake_omdb() -> (SocketAddr, RequestLog) {
    let log = RequestLog::default();
    let app = Router::new()
        .route("/", get(fake_omdb))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, log)
}

async fn widget_against(addr: SocketAddr) -> WidgetHandle {
    let config = CatalogConfig {
        base_url: format!("http://{addr}/"),
        api_key: Some("e2e-key".to_string()),
        request_timeout: Duration::from_secs(5),
        ..CatalogConfig::default()
    };
    let catalog = OmdbCatalog::new(&config).unwrap();
    let widget_config = WidgetConfig {
        debounce_interval: Duration::from_millis(50),
        ..WidgetConfig::default()
    };
    spawn_widget(Arc::new(catalog), &widget_config, None)
}

/// Polls the widget until `ready` holds or five seconds pass.
async fn wait_for(widget: &WidgetHandle, ready: impl Fn(&WidgetView) -> bool) -> WidgetView {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    loop {
        let view = widget.view().await.unwrap();
        if ready(&view) {
            return view;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "widget never reached the expected state: {view:?}"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_search_then_select_renders_detail_card() {
    let (addr, log) = start_fake_omdb().await;
    let widget = widget_against(addr).await;

    tokio_test::assert_ok!(widget.input("bat").await);
    let view = wait_for(&widget, |v| {
        matches!(v.list.content, ListContent::Candidates(_))
    })
    .await;

    let entries = view.list.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].poster, "https://img.example/batman.jpg");
    assert_eq!(entries[1].poster, PLACEHOLDER_POSTER);

    tokio_test::assert_ok!(widget.select(MovieId::new("tt0372784")).await);
    let view = wait_for(&widget, |v| {
        matches!(v.detail.content, DetailContent::Card(_))
    })
    .await;

    assert!(!view.list.visible);
    assert!(view.input.text.is_empty());
    let DetailContent::Card(card) = &view.detail.content else {
        unreachable!();
    };
    assert_eq!(card.title, "Batman Begins");
    assert_eq!(card.rated, "PG-13");
    assert_eq!(card.poster, PLACEHOLDER_POSTER);

    let requests = log.lock().clone();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].get("s").map(String::as_str), Some("bat"));
    assert_eq!(requests[0].get("page").map(String::as_str), Some("1"));
    assert_eq!(requests[0].get("apikey").map(String::as_str), Some("e2e-key"));
    assert_eq!(requests[1].get("i").map(String::as_str), Some("tt0372784"));
    assert_eq!(requests[1].get("apikey").map(String::as_str), Some("e2e-key"));
}

#[tokio::test]
async fn test_unknown_term_leaves_spinner_visible() {
    let (addr, log) = start_fake_omdb().await;
    let widget = widget_against(addr).await;

    widget.input("zzzznotreal").await.unwrap();
    wait_for(&widget, |_| !log.lock().is_empty()).await;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let view = widget.view().await.unwrap();
    assert!(view.list.visible);
    assert_eq!(view.list.content, ListContent::Loading);
}

#[tokio::test]
async fn test_server_error_surfaces_in_list() {
    let (addr, _log) = start_fake_omdb().await;
    let widget = widget_against(addr).await;

    widget.input("boom").await.unwrap();
    let view = wait_for(&widget, |v| matches!(v.list.content, ListContent::Error(_))).await;

    let ListContent::Error(message) = &view.list.content else {
        unreachable!();
    };
    assert!(message.contains("500"), "unexpected message: {message}");
}

#[tokio::test]
async fn test_typing_burst_sends_one_request() {
    let (addr, log) = start_fake_omdb().await;
    let widget = widget_against(addr).await;

    for text in ["b", "ba", "bat"] {
        widget.input(text).await.unwrap();
    }
    wait_for(&widget, |v| matches!(v.list.content, ListContent::Candidates(_))).await;

    let terms: Vec<_> = log.lock().iter().filter_map(|r| r.get("s").cloned()).collect();
    assert_eq!(terms, ["bat"]);
}
