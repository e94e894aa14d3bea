use std::collections::HashMap;

use tokio::sync::oneshot;

/// What a pending form slot is completed with: either the raw JSON response
/// array the Bedrock peer sent back, or a cancellation (closed without a
/// choice, timed out, or the session died before a response arrived).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormResponse {
    Data(String),
    Cancelled,
}

struct PendingForm {
    sender: oneshot::Sender<FormResponse>,
    expires_at_tick: u64,
}

/// Session-local form id counter plus the table of slots awaiting a
/// response. Ids are strictly increasing for the life of the session.
#[derive(Default)]
pub struct FormCache {
    next_id: i32,
    pending: HashMap<i32, PendingForm>,
}

impl FormCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_form_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Installs a single-shot slot for `id`, due to expire at `expires_at_tick`.
    /// Returns the receiving end; the caller (a translator, or a future it
    /// spawns) awaits it for the eventual response.
    pub fn put_pending(&mut self, id: i32, expires_at_tick: u64) -> oneshot::Receiver<FormResponse> {
        let (tx, rx) = oneshot::channel();
        self.pending.insert(
            id,
            PendingForm {
                sender: tx,
                expires_at_tick,
            },
        );
        rx
    }

    /// Completes the slot for `id` if one is pending. A response with an
    /// unmatched or already-completed id is silently dropped, per contract.
    pub fn complete(&mut self, id: i32, response: FormResponse) {
        if let Some(pending) = self.pending.remove(&id) {
            let _ = pending.sender.send(response);
        }
    }

    pub fn has_pending(&self, id: i32) -> bool {
        self.pending.contains_key(&id)
    }

    /// Cancels and removes every slot whose deadline is at or before `tick`.
    pub fn expire_due(&mut self, tick: u64) {
        let due: Vec<i32> = self
            .pending
            .iter()
            .filter(|(_, p)| p.expires_at_tick <= tick)
            .map(|(id, _)| *id)
            .collect();

        for id in due {
            if let Some(pending) = self.pending.remove(&id) {
                let _ = pending.sender.send(FormResponse::Cancelled);
            }
        }
    }

    /// Cancels every outstanding slot. Called when the session dies.
    pub fn cancel_all(&mut self) {
        for (_, pending) in self.pending.drain() {
            let _ = pending.sender.send(FormResponse::Cancelled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_ids_strictly_increase() {
        let mut cache = FormCache::new();
        let a = cache.next_form_id();
        let b = cache.next_form_id();
        assert!(b > a);
    }

    #[test]
    fn a_second_response_with_the_same_id_is_dropped() {
        let mut cache = FormCache::new();
        let id = cache.next_form_id();
        let mut rx = cache.put_pending(id, 1000);

        cache.complete(id, FormResponse::Data("[\"yes\"]".into()));
        // Already removed: a duplicate completion call is simply a no-op.
        cache.complete(id, FormResponse::Data("[\"no\"]".into()));

        assert_eq!(
            rx.try_recv().unwrap(),
            FormResponse::Data("[\"yes\"]".into())
        );
    }

    #[tokio::test]
    async fn expiry_completes_with_cancellation() {
        let mut cache = FormCache::new();
        let id = cache.next_form_id();
        let rx = cache.put_pending(id, 10);

        cache.expire_due(20);
        assert_eq!(rx.await.unwrap(), FormResponse::Cancelled);
        assert!(!cache.has_pending(id));
    }

    #[tokio::test]
    async fn cancel_all_resolves_every_pending_slot() {
        let mut cache = FormCache::new();
        let a = cache.next_form_id();
        let b = cache.next_form_id();
        let rx_a = cache.put_pending(a, 100);
        let rx_b = cache.put_pending(b, 100);

        cache.cancel_all();

        assert_eq!(rx_a.await.unwrap(), FormResponse::Cancelled);
        assert_eq!(rx_b.await.unwrap(), FormResponse::Cancelled);
    }
}
