//! Actor loop owning the widget engine.

use std::sync::Arc;

use tokio::sync::mpsc;

use super::commands::{WidgetCommand, WidgetEvent};
use super::engine::WidgetEngine;
use super::handle::WidgetHandle;
use super::view::ViewObserver;
use crate::catalog::MovieCatalog;
use crate::config::WidgetConfig;

/// Spawns the widget actor and returns its handle.
///
/// The actor processes user commands and internal completions one at a
/// time, so the session needs no locks. It stops when every handle has been
/// dropped or [`WidgetHandle::shutdown`] is called.
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
///
/// use marquee_core::config::WidgetConfig;
/// use marquee_core::spawn_widget;
/// # use marquee_core::{CatalogError, Detail, MovieCatalog, MovieId, SearchOutcome};
/// # #[derive(Debug)]
/// # struct Catalog;
/// # #[async_trait::async_trait]
/// # impl MovieCatalog for Catalog {
/// #     async fn search(&self, _: &str) -> Result<SearchOutcome, CatalogError> {
/// #         Ok(SearchOutcome::NoMatches)
/// #     }
/// #     async fn lookup(&self, _: &MovieId) -> Result<Detail, CatalogError> {
/// #         Ok(Detail::default())
/// #     }
/// # }
///
/// let handle = spawn_widget(Arc::new(Catalog), &WidgetConfig::default(), None);
/// handle.input("bat").await.unwrap();
/// # }
/// ```
pub fn spawn_widget(
    catalog: Arc<dyn MovieCatalog>,
    config: &WidgetConfig,
    observer: Option<Box<dyn ViewObserver>>,
) -> WidgetHandle {
    let (sender, receiver) = mpsc::channel(config.command_buffer.max(1));
    let (event_sender, event_receiver) = mpsc::unbounded_channel();
    let engine = WidgetEngine::new(catalog, config, event_sender, observer);

    tokio::spawn(async move {
        run_actor_loop(engine, receiver, event_receiver).await;
    });

    WidgetHandle::new(sender)
}

async fn run_actor_loop(
    mut engine: WidgetEngine,
    mut receiver: mpsc::Receiver<WidgetCommand>,
    mut events: mpsc::UnboundedReceiver<WidgetEvent>,
) {
    tracing::debug!("Widget actor started");

    loop {
        tokio::select! {
            command = receiver.recv() => match command {
                Some(command) => {
                    if !handle_command(&mut engine, command) {
                        break;
                    }
                }
                None => break,
            },
            Some(event) = events.recv() => {
                engine.observed(|engine| engine.handle_event(event));
            }
        }
    }

    tracing::debug!("Widget actor stopped");
}

/// Handles a single command. Returns false to shut down.
fn handle_command(engine: &mut WidgetEngine, command: WidgetCommand) -> bool {
    match command {
        WidgetCommand::Input { text, responder } => {
            engine.observed(|engine| engine.on_input(text));
            let _ = responder.send(());
        }
        WidgetCommand::Focus { responder } => {
            engine.observed(WidgetEngine::on_focus);
            let _ = responder.send(());
        }
        WidgetCommand::Click { target, responder } => {
            engine.observed(|engine| engine.on_click(target));
            let _ = responder.send(());
        }
        WidgetCommand::Select { id, responder } => {
            let result = engine.observed(|engine| engine.select(id));
            let _ = responder.send(result);
        }
        WidgetCommand::Sort { key, responder } => {
            engine.observed(|engine| engine.apply_sort(&key));
            let _ = responder.send(());
        }
        WidgetCommand::Reset { responder } => {
            engine.observed(WidgetEngine::reset);
            let _ = responder.send(());
        }
        WidgetCommand::GetView { responder } => {
            let _ = responder.send(engine.view().clone());
        }
        WidgetCommand::Shutdown { responder } => {
            let _ = responder.send(());
            return false;
        }
    }

    true
}
