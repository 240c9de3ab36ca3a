//! The presentation layer seam.

use std::sync::Arc;

use crate::conversation::Message;

/// Draws the conversation.
///
/// The controller calls these methods from its own task, one at a time,
/// right after it updates the transcript. Implementations should not block
/// for long.
pub trait Renderer: Send + Sync + 'static {
    /// Draws a message bubble for `message`, and scrolls to it.
    fn render_message(&self, message: &Message);

    /// Shows the pending indicator. The controller never calls this twice
    /// without a [`Renderer::clear_pending`] in between.
    fn show_pending(&self);

    /// Removes the pending indicator.
    fn clear_pending(&self);

    /// Removes any placeholder content shown before the first message.
    fn clear_placeholder(&self) {}
}

impl<R: Renderer + ?Sized> Renderer for Arc<R> {
    #[inline]
    fn render_message(&self, message: &Message) {
        (**self).render_message(message)
    }

    #[inline]
    fn show_pending(&self) {
        (**self).show_pending()
    }

    #[inline]
    fn clear_pending(&self) {
        (**self).clear_pending()
    }

    #[inline]
    fn clear_placeholder(&self) {
        (**self).clear_placeholder()
    }
}

/// Tracks whether the pending indicator is visible, so that only the
/// transitions reach the renderer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct PendingIndicator {
    visible: bool,
}

impl PendingIndicator {
    /// Returns `false` if the indicator was already visible.
    pub fn show(&mut self, renderer: &dyn Renderer) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        renderer.show_pending();
        true
    }

    /// Returns `false` if there was no indicator to clear.
    pub fn clear(&mut self, renderer: &dyn Renderer) -> bool {
        if !self.visible {
            return false;
        }
        self.visible = false;
        renderer.clear_pending();
        true
    }
}
