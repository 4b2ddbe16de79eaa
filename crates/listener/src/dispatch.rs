//! Dispatch-and-detach of membership changes.
//!
//! The webhook caller only needs an acknowledgement, so the outcome of an
//! outbound membership call is never reported back to it. [`Dispatcher`]
//! runs each change on its own tokio task, logs the result, and drops any
//! error. Nothing ties the task to the HTTP response: the response may be
//! written before the call starts, and the call runs to completion even if
//! the client disconnects.

use std::sync::Arc;

use board::{CardMembership, MembershipChange};
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

/// Spawns membership changes against a shared adapter.
#[derive(Clone)]
pub struct Dispatcher {
    membership: Arc<dyn CardMembership>,
}

impl Dispatcher {
    /// Creates a dispatcher over `membership`.
    pub fn new(membership: Arc<dyn CardMembership>) -> Self {
        Self { membership }
    }

    /// Starts `change` on a detached task and returns immediately.
    ///
    /// The returned handle resolves once the call has finished and its
    /// outcome has been logged. It never carries the adapter's error;
    /// dropping it does not cancel the task.
    pub fn dispatch(&self, change: MembershipChange) -> JoinHandle<()> {
        let membership = Arc::clone(&self.membership);
        let span = info_span!(
            "membership_dispatch",
            card_id = %change.card(),
            member_id = %change.member()
        );

        tokio::spawn(
            async move {
                match change.apply(membership.as_ref()).await {
                    Ok(()) => info!("Membership change applied: {change}"),
                    Err(e) => warn!(error = %e, "Membership change failed: {change}"),
                }
            }
            .instrument(span),
        )
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use board::{CardId, MemberId, MembershipError};

    use super::*;

    #[derive(Default)]
    struct FailingMembership {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CardMembership for FailingMembership {
        async fn add_member_to_card(&self, _: &CardId, _: &MemberId) -> Result<(), MembershipError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MembershipError::Transport { message: "connection refused".to_string() })
        }

        async fn remove_member_from_card(
            &self,
            _: &CardId,
            _: &MemberId,
        ) -> Result<(), MembershipError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(MembershipError::Rejected { status: 404, body: "not found".to_string() })
        }
    }

    fn change(add: bool) -> MembershipChange {
        let card = CardId::new("card-1").unwrap();
        let member = MemberId::new("member-1").unwrap();
        if add {
            MembershipChange::Add { card, member }
        } else {
            MembershipChange::Remove { card, member }
        }
    }

    #[tokio::test]
    async fn adapter_failure_is_contained_in_task() {
        let membership = Arc::new(FailingMembership::default());
        let dispatcher = Dispatcher::new(membership.clone());

        dispatcher.dispatch(change(true)).await.expect("task should not panic");
        dispatcher.dispatch(change(false)).await.expect("task should not panic");

        assert_eq!(membership.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn dropped_handle_does_not_cancel_call() {
        let membership = Arc::new(FailingMembership::default());
        let dispatcher = Dispatcher::new(membership.clone());

        drop(dispatcher.dispatch(change(true)));

        for _ in 0..100 {
            if membership.calls.load(Ordering::SeqCst) == 1 {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("detached membership call never ran");
    }
}
