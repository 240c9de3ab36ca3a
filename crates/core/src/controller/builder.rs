use std::time::Duration;

use chat_widget_model::ModelProvider;

use super::{Controller, WELCOME_DELAY};
use crate::demo::DemoResponder;
use crate::model_client::ModelClient;
use crate::renderer::Renderer;

/// [`Controller`] builder.
pub struct ControllerBuilder {
    pub(crate) model_client: ModelClient,
    pub(crate) renderer: Box<dyn Renderer>,
    pub(crate) demo: DemoResponder,
    pub(crate) welcome: Option<(String, Duration)>,
    pub(crate) on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

impl ControllerBuilder {
    /// Creates a new builder with the model provider used in live mode and
    /// the renderer that draws the conversation.
    #[inline]
    pub fn new<P, R>(provider: P, renderer: R) -> Self
    where
        P: ModelProvider + 'static,
        R: Renderer,
    {
        Self {
            model_client: ModelClient::new(provider),
            renderer: Box::new(renderer),
            demo: DemoResponder::default(),
            welcome: None,
            on_idle: None,
        }
    }

    /// Replaces the canned demo replies.
    #[inline]
    pub fn with_demo_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let delay = self.demo.delay();
        self.demo = DemoResponder::with_replies(replies).with_delay(delay);
        self
    }

    /// Sets how long a demo reply takes.
    #[inline]
    pub fn with_demo_delay(mut self, delay: Duration) -> Self {
        self.demo = self.demo.with_delay(delay);
        self
    }

    /// Appends `message` as an assistant message shortly after start.
    #[inline]
    pub fn with_welcome_message<S: Into<String>>(mut self, message: S) -> Self {
        let delay = self.welcome_delay();
        self.welcome = Some((message.into(), delay));
        self
    }

    /// Sets how long after start the welcome message appears. Has no effect
    /// unless a welcome message is set.
    #[inline]
    pub fn with_welcome_delay(mut self, delay: Duration) -> Self {
        if let Some((_, welcome_delay)) = &mut self.welcome {
            *welcome_delay = delay;
        }
        self
    }

    /// Attaches a callback to be invoked when the controller has appended a
    /// reply and no submission is waiting.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the controller and starts it on the current tokio runtime.
    #[inline]
    pub fn build(self) -> Controller {
        Controller::spawn_from_builder(self)
    }

    fn welcome_delay(&self) -> Duration {
        self.welcome
            .as_ref()
            .map_or(WELCOME_DELAY, |(_, delay)| *delay)
    }
}
