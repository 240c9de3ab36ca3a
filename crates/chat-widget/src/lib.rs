//! A chat widget that talks to Gemini, with a demo mode for when no API key
//! is at hand.
//!
//! The crate includes a CLI tool for chatting in the terminal. And you can
//! also use it as a library to embed the conversation in your own host apps
//! by supplying a [`core::Renderer`].

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod command;
#[cfg(feature = "cli")]
pub mod render;
mod session;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`chat_widget_core`] crate.
pub mod core {
    pub use chat_widget_core::*;
}

/// Re-exports of [`chat_widget_gemini_model`] crate.
pub mod gemini {
    pub use chat_widget_gemini_model::*;
}
