use async_trait::async_trait;
use std::sync::Mutex;

use crate::notify::{Notifier, NotifyError};

/// A published `(subject, message)` pair
pub type Published = (String, String);

/// Notifier that keeps everything it is asked to publish.
#[derive(Default)]
pub struct RecordingNotifier {
    published: Mutex<Vec<Published>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every publish fails.
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn published(&self) -> Vec<Published> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, subject: &str, message: &str) -> Result<String, NotifyError> {
        if self.fail {
            return Err(NotifyError::PublishFailed("simulated failure".into()));
        }
        let mut published = self.published.lock().unwrap();
        published.push((subject.to_string(), message.to_string()));
        Ok(format!("msg-{}", published.len()))
    }
}
