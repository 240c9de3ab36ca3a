//! An abstraction layer for the assistant backends the chat widget can
//! talk to.
//!
//! The conversation controller only knows about the types in this crate.
//! A backend receives one user message plus the credential the user typed
//! in, and either returns a complete reply or fails with an error that
//! reports its [`ErrorKind`]. There is no streaming and no multi-turn
//! history on this layer.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
