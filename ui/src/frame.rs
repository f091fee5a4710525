//! Coalescing of work onto the next animation frame.

use std::cell::Cell;
use std::rc::Rc;

/// Runs a callback before the next repaint.
pub trait FrameScheduler {
    /// Returns `false` when the host refused the request; the callback is
    /// then dropped without running.
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> bool;
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> bool {
        (**self).request_frame(callback)
    }
}

/// Keeps at most one frame callback outstanding.
///
/// Requests made while one is pending are dropped, not queued. The pending
/// flag is cleared just before the work runs, so the work itself may schedule
/// the next frame. A refused request clears it too, so the next event retries.
pub struct FrameThrottle<F> {
    scheduler: F,
    pending: Rc<Cell<bool>>,
}

impl<F: FrameScheduler> FrameThrottle<F> {
    pub fn new(scheduler: F) -> Self {
        Self {
            scheduler,
            pending: Rc::new(Cell::new(false)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Returns `false` when the request was coalesced into a pending one or
    /// the scheduler refused it.
    pub fn schedule(&self, work: impl FnOnce() + 'static) -> bool {
        if self.pending.replace(true) {
            return false;
        }
        let pending = Rc::clone(&self.pending);
        let requested = self.scheduler.request_frame(Box::new(move || {
            pending.set(false);
            work();
        }));
        if !requested {
            self.pending.set(false);
        }
        requested
    }
}
