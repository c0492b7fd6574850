//! Trailing-edge debounce over an injected timer.

use crate::schedule::TimerScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct Slot<A, H> {
    args: Option<A>,
    handle: Option<H>,
    generation: u64,
}

/// Runs the handler once `delay` has passed without another call, with the
/// arguments of the last call. Every call restarts the window.
pub struct Debouncer<A, S: TimerScheduler> {
    scheduler: Rc<S>,
    delay: Duration,
    slot: Rc<RefCell<Slot<A, S::TimerHandle>>>,
    handler: Rc<RefCell<dyn FnMut(A)>>,
}

impl<A, S: TimerScheduler> Clone for Debouncer<A, S> {
    fn clone(&self) -> Self {
        Self {
            scheduler: self.scheduler.clone(),
            delay: self.delay,
            slot: self.slot.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<A: 'static, S: TimerScheduler + 'static> Debouncer<A, S> {
    pub fn new(scheduler: Rc<S>, delay: Duration, handler: impl FnMut(A) + 'static) -> Self {
        let handler: Rc<RefCell<dyn FnMut(A)>> = Rc::new(RefCell::new(handler));
        Self {
            scheduler,
            delay,
            slot: Rc::new(RefCell::new(Slot {
                args: None,
                handle: None,
                generation: 0,
            })),
            handler,
        }
    }

    pub fn call(&self, args: A) {
        let (generation, stale) = {
            let mut slot = self.slot.borrow_mut();
            slot.args = Some(args);
            slot.generation = slot.generation.wrapping_add(1);
            (slot.generation, slot.handle.take())
        };
        if let Some(handle) = stale {
            self.scheduler.clear_timeout(handle);
        }

        let slot = Rc::downgrade(&self.slot);
        let handler = Rc::downgrade(&self.handler);
        let scheduled = self
            .scheduler
            .set_timeout(Box::new(move || fire(&slot, &handler, generation)), self.delay);

        let mut slot = self.slot.borrow_mut();
        match scheduled {
            Some(handle) if slot.generation == generation && slot.args.is_some() => {
                slot.handle = Some(handle);
            }
            Some(_) => {}
            None => {
                log::warn!("[debounce] could not schedule timeout");
                slot.args = None;
            }
        }
    }

}

impl<A, S: TimerScheduler> Debouncer<A, S> {
    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn cancel(&self) {
        let handle = {
            let mut slot = self.slot.borrow_mut();
            slot.generation = slot.generation.wrapping_add(1);
            slot.args = None;
            slot.handle.take()
        };
        if let Some(handle) = handle {
            self.scheduler.clear_timeout(handle);
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.slot.borrow().args.is_some()
    }
}

fn fire<A, H>(slot: &Weak<RefCell<Slot<A, H>>>, handler: &Weak<RefCell<dyn FnMut(A)>>, generation: u64) {
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let args = {
        let mut slot = slot.borrow_mut();
        if slot.generation != generation {
            return;
        }
        slot.handle = None;
        slot.args.take()
    };
    let (Some(args), Some(handler)) = (args, handler.upgrade()) else {
        return;
    };
    let Ok(mut run) = handler.try_borrow_mut() else {
        return;
    };
    (&mut *run)(args);
}
