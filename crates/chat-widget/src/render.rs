//! Drawing the conversation in a terminal.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chat_widget_core::{Message, Renderer, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

const BAR_CHAR: &str = "▎";
const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const PLACEHOLDER_TEXT: &str = "💬 Say hello to get the conversation going";
const PENDING_TEXT: &str = "🤔 Thinking...";

/// A [`Renderer`] that prints chat bubbles to stdout, and shows the pending
/// indicator as a spinner on stderr.
///
/// Until the first message arrives, a placeholder line stands where the
/// conversation will be.
pub struct TerminalRenderer {
    bars: Mutex<Bars>,
}

#[derive(Default)]
struct Bars {
    placeholder: Option<ProgressBar>,
    pending: Option<ProgressBar>,
}

impl Bars {
    fn visible(&self) -> Option<&ProgressBar> {
        self.pending.as_ref().or(self.placeholder.as_ref())
    }
}

impl TerminalRenderer {
    /// Creates a renderer and draws the placeholder.
    pub fn new() -> Self {
        let placeholder = new_spinner(PLACEHOLDER_TEXT);
        Self {
            bars: Mutex::new(Bars {
                placeholder: Some(placeholder),
                pending: None,
            }),
        }
    }

    /// Prints a line, keeping any spinner out of its way.
    pub fn println(&self, line: &str) {
        let bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        match bars.visible() {
            Some(bar) => bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }
}

impl Default for TerminalRenderer {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn render_message(&self, message: &Message) {
        self.println(&format_message(message));
    }

    fn show_pending(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        if bars.pending.is_none() {
            bars.pending = Some(new_spinner(PENDING_TEXT));
        }
    }

    fn clear_pending(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bar) = bars.pending.take() {
            bar.finish_and_clear();
        }
    }

    fn clear_placeholder(&self) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(bar) = bars.placeholder.take() {
            bar.finish_and_clear();
        }
    }
}

fn new_spinner(message: &'static str) -> ProgressBar {
    let style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(TICK_CHARS);
    let bar = ProgressBar::new_spinner();
    bar.set_style(style);
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Formats a message as a chat bubble with its time underneath.
///
/// User messages are indented to the right, like they are in a messaging
/// app.
pub fn format_message(message: &Message) -> String {
    let time = message.local_time();
    match message.sender() {
        Sender::User => {
            let bar = BAR_CHAR.bright_magenta();
            format!(
                "\n{:>8}{bar}🧑 {}\n{:>8}{bar}{}",
                "",
                message.text().bright_white().bold(),
                "",
                time.dimmed(),
            )
        }
        Sender::Assistant => {
            let bar = BAR_CHAR.bright_cyan();
            format!(
                "\n{bar}🤖 {}\n{bar}{}",
                message.text().bright_white(),
                time.dimmed(),
            )
        }
    }
}
