use announce_shared::notify::Notifier;
use std::sync::Arc;

pub mod event_handlers;

/// State shared by the event routes.
pub struct AppState<S> {
    pub store: Arc<S>,
    /// `None` when no topic is configured.
    pub notifier: Option<Arc<dyn Notifier>>,
    pub max_items: usize,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: self.notifier.clone(),
            max_items: self.max_items,
        }
    }
}
