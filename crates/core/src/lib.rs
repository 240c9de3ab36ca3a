//! Core logic of the chat widget: the conversation controller, the
//! transcript it owns, and the seams to the presentation layer and to the
//! assistant backend.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod controller;
pub mod conversation;
pub mod demo;
pub mod error;
mod model_client;
pub mod renderer;

pub use chat_widget_actor::ActorDeadError;
pub use controller::{
    Controller, ControllerBuilder, DEFAULT_WELCOME_MESSAGE, WELCOME_DELAY,
};
pub use conversation::{Message, Sender, Transcript};
pub use renderer::Renderer;
