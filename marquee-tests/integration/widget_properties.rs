//! Property tests for debouncing, clearing and dismissal.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::config::WidgetConfig;
use marquee_core::test_fixtures::{ScriptedCatalog, batman_results};
use marquee_core::widget::ListContent;
use marquee_core::{ClickTarget, SortKey, WidgetHandle, spawn_widget};
use proptest::prelude::*;

/// Any user action that can precede the one under test.
#[derive(Debug, Clone)]
enum Action {
    Type(String),
    Focus,
    Click(ClickTarget),
    Sort(SortKey),
    Wait(u64),
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop_oneof![Just("bat"), Just("batman"), Just(" "), Just(""), Just("zzz")]
            .prop_map(|text| Action::Type(text.to_string())),
        Just(Action::Focus),
        prop_oneof![
            Just(ClickTarget::SearchInput),
            Just(ClickTarget::CandidateList),
            Just(ClickTarget::FilterOption),
            Just(ClickTarget::Outside),
        ]
        .prop_map(Action::Click),
        Just(Action::Sort(SortKey::OldestToNewest)),
        (0u64..300).prop_map(Action::Wait),
    ]
}

fn paused_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .unwrap()
}

fn catalog() -> Arc<ScriptedCatalog> {
    Arc::new(
        ScriptedCatalog::new()
            .with_matches("bat", batman_results(), Duration::from_millis(30))
            .with_matches("batman", batman_results()[..1].to_vec(), Duration::from_millis(60)),
    )
}

async fn perform(widget: &WidgetHandle, action: Action) {
    match action {
        Action::Type(text) => widget.input(text).await.unwrap(),
        Action::Focus => widget.focus().await.unwrap(),
        Action::Click(target) => widget.click(target).await.unwrap(),
        Action::Sort(key) => widget.sort(key).await.unwrap(),
        Action::Wait(millis) => tokio::time::sleep(Duration::from_millis(millis)).await,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_burst_of_keystrokes_searches_once(
        texts in prop::collection::vec("[a-z]{1,6}", 1..8),
        gaps in prop::collection::vec(0u64..100, 8),
    ) {
        let runtime = paused_runtime();
        let calls = runtime.block_on(async {
            let catalog = Arc::new(ScriptedCatalog::new());
            let widget = spawn_widget(catalog.clone(), &WidgetConfig::default(), None);

            for (text, gap) in texts.iter().zip(&gaps) {
                widget.input(text.clone()).await.unwrap();
                tokio::time::sleep(Duration::from_millis(*gap)).await;
            }
            tokio::time::sleep(Duration::from_millis(500)).await;
            catalog.search_calls()
        });

        prop_assert_eq!(calls, vec![texts.last().unwrap().clone()]);
    }

    #[test]
    fn prop_empty_input_always_clears(actions in prop::collection::vec(arb_action(), 0..10)) {
        let runtime = paused_runtime();
        let (cleared, settled) = runtime.block_on(async {
            let widget = spawn_widget(catalog(), &WidgetConfig::default(), None);
            for action in actions {
                perform(&widget, action).await;
            }

            widget.input("").await.unwrap();
            let cleared = widget.view().await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
            (cleared, widget.view().await.unwrap())
        });

        prop_assert!(!cleared.list.visible);
        prop_assert_eq!(&cleared.list.content, &ListContent::Empty);
        prop_assert_eq!(cleared, settled);
    }

    #[test]
    fn prop_click_outside_always_dismisses(actions in prop::collection::vec(arb_action(), 0..10)) {
        let runtime = paused_runtime();
        let (view, detail_before) = runtime.block_on(async {
            let widget = spawn_widget(catalog(), &WidgetConfig::default(), None);
            for action in actions {
                perform(&widget, action).await;
            }

            let detail_before = widget.view().await.unwrap().detail;
            widget.click(ClickTarget::Outside).await.unwrap();
            tokio::time::sleep(Duration::from_millis(500)).await;
            (widget.view().await.unwrap(), detail_before)
        });

        prop_assert!(!view.list.visible);
        prop_assert_eq!(view.list.content, ListContent::Empty);
        prop_assert!(view.input.text.is_empty());
        prop_assert_eq!(view.detail, detail_before);
    }
}
