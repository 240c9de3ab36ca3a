//! A lightweight actor framework.
//!
//! An actor is a tokio task that exclusively owns some state and mutates it
//! in response to messages. Since only the actor task ever touches the
//! state, no locks are needed, and the state is never observed halfway
//! through handling a message.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod error;
mod handle;
mod mailbox;
mod scheduler;

pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[derive(Default)]
    struct Counter {
        value: u32,
        history: Vec<u32>,
    }

    #[derive(Debug)]
    struct Add(u32);

    impl Message<Counter> for Add {
        fn handle(self, state: &mut Counter, _handle: &Actor<Counter>) {
            state.value += self.0;
            state.history.push(self.0);
        }
    }

    /// Adds the value later from a spawned task.
    #[derive(Debug)]
    struct AddLater(u32);

    impl Message<Counter> for AddLater {
        fn handle(self, _state: &mut Counter, handle: &Actor<Counter>) {
            let handle = handle.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                handle.send(Add(self.0)).ok();
            });
        }
    }

    #[tokio::test]
    async fn test_send_and_query() {
        let actor = Actor::spawn(Counter::default(), None);
        actor.send(Add(40)).unwrap();
        actor.send(Add(2)).unwrap();

        let value = actor.query(|state| state.value).await.unwrap();
        assert_eq!(value, 42);
        let history = actor.query(|state| state.history.clone()).await.unwrap();
        assert_eq!(history, vec![40, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_up_message() {
        let actor = Actor::spawn(Counter::default(), Some("counter"));
        actor.send(AddLater(7)).unwrap();
        actor.send(Add(1)).unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        let history = actor.query(|state| state.history.clone()).await.unwrap();
        assert_eq!(history, vec![1, 7]);
    }

    #[tokio::test]
    async fn test_killed_actor() {
        let actor = Actor::spawn(Counter::default(), None);
        actor.try_kill();
        // Give the actor a chance to observe the kill signal.
        tokio::task::yield_now().await;
        assert_eq!(actor.query(|state| state.value).await, Err(ActorDeadError));
        assert_eq!(actor.send(Add(1)), Err(ActorDeadError));
    }
}
