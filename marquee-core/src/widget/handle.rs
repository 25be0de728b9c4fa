//! Handle for communicating with the widget actor.

use tokio::sync::{mpsc, oneshot};

use super::commands::{ClickTarget, WidgetCommand};
use super::sort::SortKey;
use super::view::WidgetView;
use crate::errors::WidgetError;
use crate::movie::MovieId;

/// Cloneable handle to a running widget.
///
/// Every method returns once the actor has applied the command to the view.
/// Searches and lookups it starts finish asynchronously; observe them through
/// the injected [`super::ViewObserver`] or poll [`WidgetHandle::view`].
#[derive(Debug, Clone)]
pub struct WidgetHandle {
    sender: mpsc::Sender<WidgetCommand>,
}

impl WidgetHandle {
    /// Creates a new handle with the given command sender.
    pub fn new(sender: mpsc::Sender<WidgetCommand>) -> Self {
        Self { sender }
    }

    /// Replaces the search box text, as typing does.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn input(&self, text: impl Into<String>) -> Result<(), WidgetError> {
        let text = text.into();
        self.request(|responder| WidgetCommand::Input { text, responder })
            .await
    }

    /// Focuses the search box.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn focus(&self) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Focus { responder })
            .await
    }

    /// Reports a click on `target`.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn click(&self, target: ClickTarget) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Click { target, responder })
            .await
    }

    /// Selects a rendered candidate.
    ///
    /// # Errors
    /// - `WidgetError::UnknownCandidate` - `id` is not in the rendered list
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn select(&self, id: MovieId) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Select { id, responder })
            .await?
    }

    /// Re-orders the rendered candidates.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn sort(&self, key: SortKey) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Sort { key, responder })
            .await
    }

    /// Clears the search box, candidate list and detail card.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn reset(&self) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Reset { responder })
            .await
    }

    /// Returns a snapshot of the current view.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor is no longer running
    pub async fn view(&self) -> Result<WidgetView, WidgetError> {
        self.request(|responder| WidgetCommand::GetView { responder })
            .await
    }

    /// Stops the actor. Pending timers are cancelled.
    ///
    /// # Errors
    /// - `WidgetError::EngineShutdown` - Actor had already stopped
    pub async fn shutdown(&self) -> Result<(), WidgetError> {
        self.request(|responder| WidgetCommand::Shutdown { responder })
            .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> WidgetCommand,
    ) -> Result<T, WidgetError> {
        let (responder, rx) = oneshot::channel();

        self.sender
            .send(command(responder))
            .await
            .map_err(|_| WidgetError::EngineShutdown)?;

        rx.await.map_err(|_| WidgetError::EngineShutdown)
    }
}
