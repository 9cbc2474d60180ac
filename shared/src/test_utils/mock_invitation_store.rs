use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::models::Invitation;
use crate::store::{InvitationStore, StoreError};

/// In-memory token store with switchable read/write failures.
#[derive(Default)]
pub struct MockInvitationStore {
    invitations: Mutex<HashMap<String, Invitation>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MockInvitationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent lookup fail with a backend error.
    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    /// Makes every subsequent insert or update fail with a backend error.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.invitations.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every stored invitation, in no particular order.
    pub fn all(&self) -> Vec<Invitation> {
        self.invitations.lock().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl InvitationStore for MockInvitationStore {
    async fn get_invitation(&self, token: &str) -> Result<Option<Invitation>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated read failure".into()));
        }
        Ok(self.invitations.lock().unwrap().get(token).cloned())
    }

    async fn create_invitation(&self, invitation: Invitation) -> Result<Invitation, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write failure".into()));
        }
        let mut invitations = self.invitations.lock().unwrap();
        if invitations.contains_key(&invitation.token) {
            return Err(StoreError::AlreadyExists);
        }
        invitations.insert(invitation.token.clone(), invitation.clone());
        Ok(invitation)
    }

    async fn mark_used(&self, token: &str) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("simulated write failure".into()));
        }
        let mut invitations = self.invitations.lock().unwrap();
        let invitation = invitations.get_mut(token).ok_or(StoreError::NotFound)?;
        if invitation.used {
            return Err(StoreError::Conflict);
        }
        invitation.used = true;
        Ok(())
    }
}
