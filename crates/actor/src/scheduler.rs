use std::sync::Weak;

use tokio::select;

use crate::Actor;
use crate::mailbox::{Inbox, Mailbox};

/// Drives the actor until it is killed or every handle is dropped.
pub(crate) async fn run_actor<S: Send + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    inbox: Inbox<S>,
) {
    let Inbox {
        mut msg_rx,
        mut kill_rx,
    } = inbox;
    debug!("started");

    loop {
        let envelope = select! {
            biased;

            _ = kill_rx.changed() => break,
            envelope = msg_rx.recv() => match envelope {
                Some(envelope) => envelope,
                None => break,
            },
        };
        trace!("received message: {envelope:?}");

        // Messages may still be queued after the last handle is gone, but
        // nobody can observe their effects anymore.
        let Some(mailbox) = mailbox.upgrade() else {
            warn!("all handles have been dropped, discarding the message");
            break;
        };
        let handle = Actor::from_mailbox(mailbox);
        trace_span!("proc msg").in_scope(|| {
            envelope.open(&mut state, &handle);
        });
    }

    debug!("stopped");
}
