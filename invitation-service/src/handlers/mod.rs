use std::sync::Arc;

pub mod invitation_handlers;

/// State shared by the invitation routes.
pub struct AppState<S> {
    pub store: Arc<S>,
    pub frontend_url: Option<Arc<str>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            frontend_url: self.frontend_url.clone(),
        }
    }
}
