//! Conversation-related types.

use std::slice;

use chrono::{DateTime, Local};

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The assistant, whether it is a demo reply, a live reply, or an
    /// error notice.
    Assistant,
}

/// A message in the conversation. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    created_at: DateTime<Local>,
}

impl Message {
    /// Creates a message stamped with the current local time.
    #[inline]
    pub fn new<S: Into<String>>(sender: Sender, text: S) -> Self {
        Self {
            sender,
            text: text.into(),
            created_at: Local::now(),
        }
    }

    /// Returns who wrote this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the message text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the message was created.
    #[inline]
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Returns the creation time formatted as local wall-clock time.
    #[inline]
    pub fn local_time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}

/// The ordered, append-only record of the messages in this session.
///
/// Only the controller appends to it, so from the outside the transcript
/// is read-only. It is never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    #[inline]
    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns the messages in append order.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Iterates over the messages in append order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Message> {
        self.messages.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Message;
    type IntoIter = slice::Iter<'a, Message>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order() {
        let mut transcript = Transcript::default();
        assert!(transcript.is_empty());

        transcript.push(Message::new(Sender::User, "Hi"));
        transcript.push(Message::new(Sender::Assistant, "Hello!"));
        transcript.push(Message::new(Sender::User, "Bye"));

        let texts: Vec<_> = transcript.iter().map(Message::text).collect();
        assert_eq!(texts, ["Hi", "Hello!", "Bye"]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().map(Message::sender), Some(Sender::User));

        let messages = transcript.messages();
        assert!(messages[0].created_at() <= messages[2].created_at());
    }

    #[test]
    fn test_local_time() {
        let message = Message::new(Sender::Assistant, "Hello!");
        let formatted = message.local_time();
        assert_eq!(formatted.len(), 8);
        assert_eq!(formatted.matches(':').count(), 2);
    }
}
