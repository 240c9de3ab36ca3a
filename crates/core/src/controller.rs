mod builder;
mod state;

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use chat_widget_actor::{Actor, ActorDeadError};
use tokio::task::JoinHandle;

use crate::conversation::Transcript;
use crate::demo::DemoResponder;
use crate::model_client::ModelClient;
use crate::renderer::{PendingIndicator, Renderer};
pub use builder::ControllerBuilder;
use state::{
    ClearPending, EnqueueSubmission, ShowPending, Stage, Start, Submission,
};

/// The assistant's greeting, appended shortly after the controller starts
/// when enabled with [`ControllerBuilder::with_welcome_message`].
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome! I'm your Gemini 3 AI assistant built for social good. How can I help you make a positive impact today?";

/// How long after start the welcome message appears.
pub const WELCOME_DELAY: Duration = Duration::from_millis(1000);

struct ControllerState {
    model_client: ModelClient,
    renderer: Box<dyn Renderer>,
    demo: DemoResponder,
    welcome: Option<(String, Duration)>,
    transcript: Transcript,
    pending: PendingIndicator,
    current_stage: Stage,
    queued: VecDeque<Submission>,
    running_tasks: HashMap<u64, JoinHandle<()>>,
    next_task_id: u64,

    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
}

/// The conversation controller.
///
/// It owns the transcript, decides between demo mode and live mode for
/// each submission, talks to the model provider and drives the renderer.
/// All of this happens on a background task; the controller itself is a
/// cheap handle that can be cloned and shared with input handlers.
///
/// Submissions are handled strictly one after another. A submission that
/// arrives while a reply is still outstanding waits in a queue, so every
/// user message is directly followed by its reply in the transcript.
#[derive(Clone)]
pub struct Controller {
    handle: Actor<ControllerState>,
}

impl Controller {
    /// Submits what the user typed, along with the credential field.
    ///
    /// Input that is empty after trimming is ignored. An empty credential
    /// selects demo mode. The outcome is only observable through the
    /// transcript and the renderer.
    pub fn submit_user_message(&self, raw_text: &str, credential: &str) {
        let submission = match Submission::parse(raw_text, credential) {
            Ok(submission) => submission,
            Err(err) => {
                debug!("ignoring submission: {err}");
                return;
            }
        };
        self.post(EnqueueSubmission(submission));
    }

    /// Shows the pending indicator, unless it is already visible.
    #[inline]
    pub fn show_pending_indicator(&self) {
        self.post(ShowPending);
    }

    /// Clears the pending indicator. Does nothing if there is none.
    #[inline]
    pub fn clear_pending_indicator(&self) {
        self.post(ClearPending);
    }

    /// Returns a snapshot of the transcript, including every message
    /// appended by requests made before this call was handled.
    ///
    /// Fails once the controller has been shut down.
    pub async fn transcript(&self) -> Result<Transcript, ActorDeadError> {
        self.handle.query(|state| state.transcript.clone()).await
    }

    /// Stops the controller. Outstanding replies and timers are dropped.
    #[inline]
    pub fn shutdown(&self) {
        self.handle.try_kill();
    }

    fn post<M: chat_widget_actor::Message<ControllerState>>(&self, msg: M) {
        if let Err(err) = self.handle.send(msg) {
            warn!("controller is gone: {err}");
        }
    }

    fn spawn_from_builder(builder: ControllerBuilder) -> Self {
        let ControllerBuilder {
            model_client,
            renderer,
            demo,
            welcome,
            on_idle,
        } = builder;

        let state = ControllerState {
            model_client,
            renderer,
            demo,
            welcome,
            transcript: Default::default(),
            pending: Default::default(),
            current_stage: Default::default(),
            queued: Default::default(),
            running_tasks: Default::default(),
            next_task_id: 1,
            on_idle,
        };
        let controller = Self {
            handle: Actor::spawn(state, Some("controller")),
        };
        controller.post(Start);
        controller
    }
}

impl Drop for ControllerState {
    fn drop(&mut self) {
        for (_, task) in self.running_tasks.drain() {
            task.abort();
        }
    }
}
