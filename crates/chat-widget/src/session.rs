use std::time::Duration;

use chat_widget_core::{
    ActorDeadError, Controller, ControllerBuilder, DEFAULT_WELCOME_MESSAGE,
    Renderer, Transcript,
};
use chat_widget_model::ModelProvider;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    controller_builder: ControllerBuilder,
    credential: String,
    default_welcome: bool,
}

impl SessionBuilder {
    /// Creates a session builder with a model provider for live mode and
    /// a renderer that draws the conversation.
    ///
    /// The session greets the user with [`DEFAULT_WELCOME_MESSAGE`] unless
    /// configured otherwise.
    pub fn with_model_provider<M, R>(provider: M, renderer: R) -> Self
    where
        M: ModelProvider + 'static,
        R: Renderer,
    {
        let controller_builder = ControllerBuilder::new(provider, renderer);
        Self {
            controller_builder,
            credential: String::new(),
            default_welcome: true,
        }
    }

    /// Sets the API key that messages are sent with. Leaving it empty keeps
    /// the session in demo mode.
    #[inline]
    pub fn with_credential<S: Into<String>>(mut self, credential: S) -> Self {
        self.credential = credential.into();
        self
    }

    /// Replaces the welcome message.
    #[inline]
    pub fn with_welcome_message<S: Into<String>>(mut self, message: S) -> Self {
        self.controller_builder =
            self.controller_builder.with_welcome_message(message);
        self.default_welcome = false;
        self
    }

    /// Starts the session without a welcome message.
    #[inline]
    pub fn without_welcome_message(mut self) -> Self {
        self.default_welcome = false;
        self
    }

    /// Replaces the canned replies used in demo mode.
    #[inline]
    pub fn with_demo_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controller_builder =
            self.controller_builder.with_demo_replies(replies);
        self
    }

    /// Sets how long a demo reply takes.
    #[inline]
    pub fn with_demo_delay(mut self, delay: Duration) -> Self {
        self.controller_builder =
            self.controller_builder.with_demo_delay(delay);
        self
    }

    /// Attaches a callback to be invoked when the session is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.controller_builder = self.controller_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session. Must be called within a tokio runtime.
    pub fn build(self) -> Session {
        let mut controller_builder = self.controller_builder;
        if self.default_welcome {
            controller_builder = controller_builder
                .with_welcome_message(DEFAULT_WELCOME_MESSAGE);
        }
        Session {
            controller: controller_builder.build(),
            credential: self.credential,
        }
    }
}

/// A chat session, like a window that displays messages and has an input
/// box next to an API key field.
///
/// The session is basically a wrapper around [`Controller`] that remembers
/// the API key between messages. Dropping the session stops the controller,
/// discarding any reply that is still on its way.
pub struct Session {
    controller: Controller,
    credential: String,
}

impl Session {
    /// Sends a message to the session.
    #[inline]
    pub fn send_message(&self, message: &str) {
        self.controller.submit_user_message(message, &self.credential);
    }

    /// Replaces the API key. An empty key switches to demo mode.
    pub fn set_credential<S: Into<String>>(&mut self, credential: S) {
        self.credential = credential.into();
        debug!(
            "switched to {} mode",
            if self.is_demo() { "demo" } else { "live" }
        );
    }

    /// Returns the current API key.
    #[inline]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Returns `true` if messages are answered with canned replies.
    #[inline]
    pub fn is_demo(&self) -> bool {
        self.credential.trim().is_empty()
    }

    /// Returns a snapshot of the conversation so far.
    #[inline]
    pub async fn transcript(&self) -> Result<Transcript, ActorDeadError> {
        self.controller.transcript().await
    }

    /// Returns the underlying controller.
    #[inline]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}
