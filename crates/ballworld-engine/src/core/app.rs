use super::ctx::{FrameCtx, InputCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called after each platform event that changed input state.
    ///
    /// `ctx.frame` holds only that event's transitions.
    fn on_input(&mut self, ctx: &mut InputCtx<'_>) -> AppControl {
        let _ = ctx;
        AppControl::Continue
    }

    /// Called when the window needs repainting.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
