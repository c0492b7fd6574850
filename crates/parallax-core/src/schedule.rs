//! Clocks the coalescer and debouncer are driven by.
//!
//! On the web these are `requestAnimationFrame` and `setTimeout`; tests plug in
//! manually pumped fakes. A scheduler returns `None` when it could not queue the
//! callback at all.

use std::time::Duration;

pub trait FrameScheduler {
    type FrameHandle;

    /// Run `callback` once, before the next rendering frame.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Self::FrameHandle>;
    fn cancel_frame(&self, handle: Self::FrameHandle);
}

pub trait TimerScheduler {
    type TimerHandle;

    /// Run `callback` once after `delay` has elapsed.
    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<Self::TimerHandle>;
    fn clear_timeout(&self, handle: Self::TimerHandle);
}
