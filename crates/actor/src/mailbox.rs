use std::fmt::{self, Debug};

use tokio::sync::{mpsc, oneshot, watch};

use crate::{Actor, ActorDeadError};

/// A message that an actor with state `S` can handle.
pub trait Message<S>: Send + Debug + 'static {
    /// Handles the message with mutable access to the actor's state.
    ///
    /// `handle` refers to the actor itself, so the message can schedule
    /// follow-up messages, e.g. from a spawned task.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

/// Object-safe form of [`Message`], so the mailbox can hold messages of
/// different types.
pub(crate) trait Envelope<S>: Send + Debug {
    fn open(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> Envelope<S> for M {
    #[inline]
    fn open(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

pub(crate) type BoxEnvelope<S> = Box<dyn Envelope<S>>;

/// Reads a value out of the state and sends it back to the caller.
pub(crate) struct Query<S, R> {
    pub read: Box<dyn FnOnce(&S) -> R + Send>,
    pub reply_tx: oneshot::Sender<R>,
}

impl<S, R> Debug for Query<S, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query").finish_non_exhaustive()
    }
}

impl<S: 'static, R: Send + 'static> Message<S> for Query<S, R> {
    fn handle(self, state: &mut S, _handle: &Actor<S>) {
        // The caller may have stopped waiting.
        self.reply_tx.send((self.read)(state)).ok();
    }
}

/// The sending half shared by all handles of one actor.
pub(crate) struct Mailbox<S> {
    msg_tx: mpsc::UnboundedSender<BoxEnvelope<S>>,
    kill_tx: watch::Sender<bool>,
}

pub(crate) struct Inbox<S> {
    pub msg_rx: mpsc::UnboundedReceiver<BoxEnvelope<S>>,
    pub kill_rx: watch::Receiver<bool>,
}

impl<S: 'static> Mailbox<S> {
    pub fn open() -> (Self, Inbox<S>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        (Mailbox { msg_tx, kill_tx }, Inbox { msg_rx, kill_rx })
    }

    #[inline]
    pub fn post(&self, msg: BoxEnvelope<S>) -> Result<(), ActorDeadError> {
        self.msg_tx.send(msg).map_err(|_| ActorDeadError)
    }

    #[inline]
    pub fn kill(&self) {
        self.kill_tx.send(true).ok();
    }
}
