//! Canned replies for running without a credential.

use std::time::Duration;

use rand::seq::IndexedRandom;

/// How long a demo reply pretends to take.
pub const DEMO_REPLY_DELAY: Duration = Duration::from_millis(1500);

/// The replies used when no others are configured.
pub const DEFAULT_DEMO_REPLIES: [&str; 4] = [
    "Hello! I'm a demo version of the Gemini 3 AI assistant. To experience the full capabilities, please add your API key above.",
    "This is a simulated response. The real Gemini 3 integration offers multimodal reasoning and reduced latency for amazing user experiences!",
    "I'd love to help you with that! In the full version, I can process images, answer complex questions, and provide detailed assistance.",
    "Thanks for trying the demo! The actual Gemini 3 API provides much more sophisticated responses and can handle various types of content.",
];

/// Produces demo replies: a uniformly random pick from a fixed set, after a
/// fixed delay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoResponder {
    replies: Vec<String>,
    delay: Duration,
}

impl DemoResponder {
    /// Creates a responder with the given replies. An empty set falls back
    /// to [`DEFAULT_DEMO_REPLIES`].
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies: Vec<String> =
            replies.into_iter().map(Into::into).collect();
        if replies.is_empty() {
            warn!("no demo replies given, using the default ones");
            return Self::default();
        }
        Self {
            replies,
            delay: DEMO_REPLY_DELAY,
        }
    }

    /// Sets the simulated latency.
    #[inline]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the simulated latency.
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Returns the canned replies.
    #[inline]
    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    /// Picks one of the replies at random.
    pub fn pick(&self) -> String {
        self.replies
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for DemoResponder {
    fn default() -> Self {
        Self {
            replies: DEFAULT_DEMO_REPLIES.map(String::from).to_vec(),
            delay: DEMO_REPLY_DELAY,
        }
    }
}
