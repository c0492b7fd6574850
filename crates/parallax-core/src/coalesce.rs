//! Collapse bursts of calls into one handler run per rendering frame.

use crate::schedule::FrameScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Slot<A, H> {
    args: Option<A>,
    pending: bool,
    handle: Option<H>,
    // Bumped on cancel so a callback the platform failed to cancel is inert.
    generation: u64,
}

/// Calls made before the next frame overwrite each other; the handler runs
/// once with the last arguments.
pub struct FrameCoalescer<A, S: FrameScheduler> {
    scheduler: Rc<S>,
    slot: Rc<RefCell<Slot<A, S::FrameHandle>>>,
    handler: Rc<RefCell<dyn FnMut(A)>>,
}

impl<A, S: FrameScheduler> Clone for FrameCoalescer<A, S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            slot: self.slot.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<A: 'static, S: FrameScheduler + 'static> FrameCoalescer<A, S> {
    pub fn new(scheduler: Rc<S>, handler: impl FnMut(A) + 'static) -> Self {
        let handler: Rc<RefCell<dyn FnMut(A)>> = Rc::new(RefCell::new(handler));
        Self {
            scheduler,
            slot: Rc::new(RefCell::new(Slot {
                args: None,
                pending: false,
                handle: None,
                generation: 0,
            })),
            handler,
        }
    }

    pub fn call(&self, args: A) {
        let generation = {
            let mut slot = self.slot.borrow_mut();
            slot.args = Some(args);
            if slot.pending {
                return;
            }
            slot.pending = true;
            slot.generation
        };

        let slot = Rc::downgrade(&self.slot);
        let handler = Rc::downgrade(&self.handler);
        let requested = self
            .scheduler
            .request_frame(Box::new(move || fire(&slot, &handler, generation)));

        let mut slot = self.slot.borrow_mut();
        match requested {
            Some(handle) if slot.pending && slot.generation == generation => {
                slot.handle = Some(handle);
            }
            Some(_) => {}
            None => {
                log::warn!("[coalesce] could not request an animation frame");
                slot.pending = false;
                slot.args = None;
            }
        }
    }

}

impl<A, S: FrameScheduler> FrameCoalescer<A, S> {
    /// Drop any queued call. The handler will not run for it.
    pub fn cancel(&self) {
        let handle = {
            let mut slot = self.slot.borrow_mut();
            slot.generation = slot.generation.wrapping_add(1);
            slot.pending = false;
            slot.args = None;
            slot.handle.take()
        };
        if let Some(handle) = handle {
            self.scheduler.cancel_frame(handle);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().pending
    }
}

fn fire<A, H>(slot: &Weak<RefCell<Slot<A, H>>>, handler: &Weak<RefCell<dyn FnMut(A)>>, generation: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let args = {
        let mut slot = slot.borrow_mut();
        if !slot.pending || slot.generation != generation {
            return;
        }
        slot.pending = false;
        slot.handle = None;
        slot.args.take()
    };
    let (Some(args), Some(handler)) = (args, handler.upgrade()) else {
        return;
    };
    // A handler that re-enters its own coalescer drops the nested frame.
    let Ok(mut run) = handler.try_borrow_mut() else {
        return;
    };
    (&mut *run)(args);
}
