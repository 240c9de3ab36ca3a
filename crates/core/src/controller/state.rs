use std::fmt::{self, Debug};

use chat_widget_actor::{Actor, Message as ActorMessage};
use chat_widget_model::ModelRequest;
use tokio::time::sleep;

use super::ControllerState;
use crate::conversation::{Message, Sender};
use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    DemoDelayed,
    RemoteInFlight,
}

#[derive(Clone, PartialEq, Eq)]
enum Mode {
    Demo,
    Live { credential: String },
}

/// A validated user submission.
#[derive(Clone, PartialEq, Eq)]
pub struct Submission {
    text: String,
    mode: Mode,
}

impl Submission {
    pub fn parse(raw_text: &str, credential: &str) -> Result<Self, Error> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(Error::empty_input());
        }
        let credential = credential.trim();
        let mode = if credential.is_empty() {
            Mode::Demo
        } else {
            Mode::Live {
                credential: credential.to_owned(),
            }
        };
        Ok(Self {
            text: text.to_owned(),
            mode,
        })
    }
}

impl Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            Mode::Demo => "demo",
            Mode::Live { .. } => "live",
        };
        f.debug_struct("Submission")
            .field("text", &self.text)
            .field("mode", &mode)
            .finish()
    }
}

impl ControllerState {
    #[inline]
    fn enqueue_submission(
        &mut self,
        submission: Submission,
        handle: &Actor<Self>,
    ) {
        if self.current_stage != Stage::Idle {
            // A reply is still outstanding, this one goes after it.
            debug!("queued {submission:?}");
            self.queued.push_back(submission);
            return;
        }
        self.process_submission_checked(submission, handle);
    }

    fn process_next_submission(&mut self, handle: &Actor<Self>) {
        if self.current_stage != Stage::Idle {
            return;
        }
        if let Some(submission) = self.queued.pop_front() {
            self.process_submission_checked(submission, handle);
        } else if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    /// Process the submission, assuming the stage is checked.
    fn process_submission_checked(
        &mut self,
        submission: Submission,
        handle: &Actor<Self>,
    ) {
        let Submission { text, mode } = submission;
        self.append_message(Sender::User, text.clone());
        self.pending.show(&*self.renderer);

        let handle_clone = handle.clone();
        match mode {
            Mode::Demo => {
                self.current_stage = Stage::DemoDelayed;
                let delay = self.demo.delay();
                let reply = self.demo.pick();
                self.spawn_task(
                    async move {
                        sleep(delay).await;
                        handle_clone.send(ReplyFinished(Ok(reply))).ok();
                    },
                    handle,
                );
            }
            Mode::Live { credential } => {
                self.current_stage = Stage::RemoteInFlight;
                let reply_fut = self
                    .model_client
                    .send_request(ModelRequest::new(text, credential));
                self.spawn_task(
                    async move {
                        let result = reply_fut
                            .await
                            .map(|reply| reply.text)
                            .map_err(|err| Error::from_provider(&*err));
                        handle_clone.send(ReplyFinished(result)).ok();
                    },
                    handle,
                );
            }
        }
        trace!("stage: {:?}", self.current_stage);
    }

    fn finish_reply(
        &mut self,
        result: Result<String, Error>,
        handle: &Actor<Self>,
    ) {
        self.pending.clear(&*self.renderer);

        let text = match result {
            Ok(text) => text,
            Err(err) => {
                error!("reply failed: {err}");
                err.fallback_text().unwrap_or_default().to_owned()
            }
        };
        self.append_message(Sender::Assistant, text);

        self.current_stage = Stage::Idle;
        self.process_next_submission(handle);
    }

    /// Appends a message to the transcript and draws it.
    fn append_message(&mut self, sender: Sender, text: String) {
        if self.transcript.is_empty() {
            self.renderer.clear_placeholder();
        }
        let message = Message::new(sender, text);
        self.renderer.render_message(&message);
        self.transcript.push(message);
    }

    fn spawn_task<Fut>(&mut self, fut: Fut, handle: &Actor<Self>)
    where
        Fut: Future<Output = ()> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let handle = handle.clone();
        let task = tokio::spawn(async move {
            fut.await;
            handle.send(TaskEnded(task_id)).ok();
        });
        self.running_tasks.insert(task_id, task);
    }
}

#[derive(Debug)]
pub struct Start;

impl ActorMessage<ControllerState> for Start {
    fn handle(
        self,
        state: &mut ControllerState,
        handle: &Actor<ControllerState>,
    ) {
        let Some((message, delay)) = state.welcome.take() else {
            return;
        };
        let handle_clone = handle.clone();
        state.spawn_task(
            async move {
                sleep(delay).await;
                handle_clone.send(AppendWelcome(message)).ok();
            },
            handle,
        );
    }
}

#[derive(Debug)]
struct AppendWelcome(String);

impl ActorMessage<ControllerState> for AppendWelcome {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        state.append_message(Sender::Assistant, self.0);
    }
}

#[derive(Debug)]
pub struct EnqueueSubmission(pub Submission);

impl ActorMessage<ControllerState> for EnqueueSubmission {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        handle: &Actor<ControllerState>,
    ) {
        state.enqueue_submission(self.0, handle);
    }
}

#[derive(Debug)]
struct ReplyFinished(Result<String, Error>);

impl ActorMessage<ControllerState> for ReplyFinished {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        handle: &Actor<ControllerState>,
    ) {
        state.finish_reply(self.0, handle);
    }
}

#[derive(Debug)]
pub struct ShowPending;

impl ActorMessage<ControllerState> for ShowPending {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        state.pending.show(&*state.renderer);
    }
}

#[derive(Debug)]
pub struct ClearPending;

impl ActorMessage<ControllerState> for ClearPending {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        state.pending.clear(&*state.renderer);
    }
}

#[derive(Debug)]
struct TaskEnded(u64);

impl ActorMessage<ControllerState> for TaskEnded {
    #[inline]
    fn handle(
        self,
        state: &mut ControllerState,
        _handle: &Actor<ControllerState>,
    ) {
        if state.running_tasks.remove(&self.0).is_none() {
            warn!("unknown task {} ended", self.0);
        }
    }
}
