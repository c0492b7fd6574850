//! Lifecycle binder: wires scroll/resize/load events of a host environment to
//! the offset computation and tears everything down again.
//!
//! The binder is either inactive or active. While active it owns one frame
//! coalescer (scroll) and one debouncer (resize and media load), plus the
//! listener registrations it made. Closures handed to the host only hold weak
//! references, so nothing they do can outlive the binder.

use crate::coalesce::FrameCoalescer;
use crate::config::{Config, ConfigError};
use crate::constants::resize_debounce;
use crate::debounce::Debouncer;
use crate::geometry::GeometryProbe;
use crate::position::{self, Placement};
use crate::resolver::{self, Dom, ScrollTarget, ScrollTree};
use crate::schedule::{FrameScheduler, TimerScheduler};
use crate::state::RuntimeState;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    Load,
    LoadStart,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::Load => "load",
            EventKind::LoadStart => "loadstart",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventSource<E> {
    Window,
    Element(E),
}

impl<E> From<ScrollTarget<E>> for EventSource<E> {
    fn from(target: ScrollTarget<E>) -> Self {
        match target {
            ScrollTarget::Viewport => EventSource::Window,
            ScrollTarget::Element(e) => EventSource::Element(e),
        }
    }
}

/// Options a listener is registered with. Removal must use the same ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenOptions {
    pub passive: bool,
    pub capture: bool,
}

impl ListenOptions {
    pub const PASSIVE: Self = Self {
        passive: true,
        capture: false,
    };
}

pub trait EventBinder: Dom {
    type Listener;

    fn listen(
        &self,
        source: &EventSource<Self::Element>,
        kind: EventKind,
        options: ListenOptions,
        callback: Rc<dyn Fn()>,
    ) -> Option<Self::Listener>;
    fn unlisten(&self, listener: Self::Listener);
}

pub trait MediaSurface: Dom {
    /// Intrinsic height, if the media has any yet.
    fn natural_height(&self, media: &Self::Element) -> Option<f64>;
    fn set_transform(&self, media: &Self::Element, transform: &str);
}

/// Everything the binder needs from its environment.
pub trait Host:
    GeometryProbe + ScrollTree + MediaSurface + EventBinder + FrameScheduler + TimerScheduler
{
}

impl<T> Host for T where
    T: GeometryProbe + ScrollTree + MediaSurface + EventBinder + FrameScheduler + TimerScheduler
{
}

/// Receivers of each recomputed percent.
#[derive(Default)]
pub struct Callbacks {
    on_scroll: Option<Box<dyn FnMut(f64)>>,
    on_content: Option<Box<dyn FnMut(f64)>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `scroll` notification.
    pub fn on_scroll(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_scroll = Some(Box::new(f));
        self
    }

    /// Content overlay renderer, handed `percentScrolled`.
    pub fn on_content(mut self, f: impl FnMut(f64) + 'static) -> Self {
        self.on_content = Some(Box::new(f));
        self
    }

    fn emit(&mut self, percent: f64) {
        if let Some(f) = self.on_scroll.as_mut() {
            f(percent);
        }
        if let Some(f) = self.on_content.as_mut() {
            f(percent);
        }
    }
}

struct Mount<E> {
    element: E,
    media: E,
    target: ScrollTarget<E>,
}

struct Shared<E> {
    config: Config,
    state: RuntimeState,
    mount: Option<Mount<E>>,
}

struct Inner<H: Host> {
    host: Rc<H>,
    shared: RefCell<Shared<H::Element>>,
    callbacks: RefCell<Callbacks>,
    // Percents produced while a callback is running, delivered in order
    // once it returns.
    outbox: RefCell<VecDeque<f64>>,
}

impl<H: Host> Inner<H> {
    fn media_height(&self, media: &H::Element) -> f64 {
        let h = self
            .host
            .natural_height(media)
            .filter(|h| *h > 0.0)
            .unwrap_or_else(|| self.host.height(media));
        if h.is_finite() {
            h
        } else {
            0.0
        }
    }

    /// Re-measure the media, then recompute.
    fn refresh_media(&self) {
        let media_height = {
            let shared = self.shared.borrow();
            let Some(mount) = shared.mount.as_ref() else {
                return;
            };
            self.media_height(&mount.media)
        };
        self.shared.borrow_mut().state.media_height = media_height;
        self.recompute();
    }

    fn recompute(&self) {
        let percent = {
            let mut shared = self.shared.borrow_mut();
            let Shared {
                config,
                state,
                mount,
            } = &mut *shared;
            let Some(mount) = mount.as_ref() else {
                return;
            };
            state.scrolling = false;
            let container = self.host.measure_target(&mount.target);
            let element = self.host.measure_element(&mount.element);
            let placement = position::compute(container, element, config, state.media_height);
            log::trace!(
                "[parallax] container=({:.1},{:.1}) top={:.1} -> {:?}",
                container.top,
                container.bottom,
                element.top,
                placement
            );
            let Placement::Visible {
                percent,
                media_offset,
            } = placement
            else {
                return;
            };
            self.host
                .set_transform(&mount.media, &position::media_transform(media_offset));
            state.percent_scrolled = percent;
            percent
        };
        self.emit(percent);
    }

    fn emit(&self, percent: f64) {
        self.outbox.borrow_mut().push_back(percent);
        // Already emitting further up the stack: that loop delivers it.
        let Ok(mut callbacks) = self.callbacks.try_borrow_mut() else {
            return;
        };
        loop {
            let next = self.outbox.borrow_mut().pop_front();
            let Some(percent) = next else {
                break;
            };
            callbacks.emit(percent);
        }
    }
}

struct Binding<H: Host> {
    coalescer: FrameCoalescer<(), H>,
    debouncer: Debouncer<(), H>,
    listeners: SmallVec<[H::Listener; 4]>,
}

/// A parallax instance bound to one host element and its media.
pub struct Parallax<H: Host> {
    inner: Rc<Inner<H>>,
    binding: Option<Binding<H>>,
}

impl<H: Host> Parallax<H> {
    pub fn new(host: Rc<H>, config: Config) -> Self {
        Self {
            inner: Rc::new(Inner {
                host,
                shared: RefCell::new(Shared {
                    config,
                    state: RuntimeState::default(),
                    mount: None,
                }),
                callbacks: RefCell::new(Callbacks::default()),
                outbox: RefCell::new(VecDeque::new()),
            }),
            binding: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.binding.is_some()
    }

    #[inline]
    pub fn config(&self) -> Config {
        self.inner.shared.borrow().config
    }

    /// Last percent computed while the host was in view.
    #[inline]
    pub fn percent_scrolled(&self) -> f64 {
        self.inner.shared.borrow().state.percent_scrolled
    }

    #[inline]
    pub fn media_height(&self) -> f64 {
        self.inner.shared.borrow().state.media_height
    }

    #[inline]
    pub fn is_scrolling(&self) -> bool {
        self.inner.shared.borrow().state.scrolling
    }

    pub fn scroll_target(&self) -> Option<ScrollTarget<H::Element>> {
        let shared = self.inner.shared.borrow();
        shared.mount.as_ref().map(|m| m.target.clone())
    }

    /// Change the container height and recompute right away.
    pub fn set_height(&mut self, height: f64) -> Result<(), ConfigError> {
        let result = self.inner.shared.borrow_mut().config.set_height(height);
        if let Err(e) = result {
            log::warn!("[parallax] {e}; keeping height {}", self.config().height());
            return Err(e);
        }
        if self.is_active() {
            self.inner.recompute();
        }
        Ok(())
    }

    /// Change the speed; picked up by the next recomputation.
    pub fn set_speed(&mut self, speed: f64) -> Result<(), ConfigError> {
        let result = self.inner.shared.borrow_mut().config.set_speed(speed);
        if let Err(e) = result {
            log::warn!("[parallax] {e}; keeping speed {}", self.config().speed());
        }
        result
    }

    /// Remove every listener and cancel queued work. Safe to call repeatedly.
    pub fn deactivate(&mut self) {
        let Some(binding) = self.binding.take() else {
            return;
        };
        binding.coalescer.cancel();
        binding.debouncer.cancel();
        for listener in binding.listeners {
            self.inner.host.unlisten(listener);
        }
        {
            let mut shared = self.inner.shared.borrow_mut();
            shared.mount = None;
            shared.state.scrolling = false;
        }
        self.inner.outbox.borrow_mut().clear();
        if let Ok(mut callbacks) = self.inner.callbacks.try_borrow_mut() {
            *callbacks = Callbacks::default();
        }
        log::debug!("[parallax] deactivated");
    }
}

impl<H: Host + 'static> Parallax<H> {
    /// Resolve the scroll target, register listeners and run the first
    /// recomputation synchronously.
    pub fn activate(&mut self, element: H::Element, media: H::Element, callbacks: Callbacks) {
        if self.is_active() {
            log::warn!("[parallax] already active; ignoring activate");
            return;
        }
        let host = self.inner.host.clone();
        let target = resolver::resolve(host.as_ref(), &element);
        let needs_load_hooks = host.natural_height(&media).map_or(true, |h| h <= 0.0);
        log::debug!(
            "[parallax] activating: target={} load_hooks={}",
            if target.is_viewport() { "viewport" } else { "element" },
            needs_load_hooks
        );

        {
            let mut shared = self.inner.shared.borrow_mut();
            shared.state = RuntimeState::default();
            shared.mount = Some(Mount {
                element,
                media: media.clone(),
                target: target.clone(),
            });
        }
        *self.inner.callbacks.borrow_mut() = callbacks;

        let weak = Rc::downgrade(&self.inner);
        let coalescer = FrameCoalescer::new(host.clone(), move |()| {
            if let Some(inner) = weak.upgrade() {
                inner.recompute();
            }
        });
        let weak = Rc::downgrade(&self.inner);
        let debouncer = Debouncer::new(host.clone(), resize_debounce(), move |()| {
            if let Some(inner) = weak.upgrade() {
                inner.refresh_media();
            }
        });

        let on_scroll: Rc<dyn Fn()> = {
            let weak = Rc::downgrade(&self.inner);
            let coalescer = coalescer.clone();
            Rc::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.shared.borrow_mut().state.scrolling = true;
                }
                coalescer.call(());
            })
        };
        let on_resize: Rc<dyn Fn()> = {
            let debouncer = debouncer.clone();
            Rc::new(move || debouncer.call(()))
        };

        let mut listeners = SmallVec::new();
        let mut bind = |source: EventSource<H::Element>, kind: EventKind, callback: &Rc<dyn Fn()>| {
            match host.listen(&source, kind, ListenOptions::PASSIVE, callback.clone()) {
                Some(listener) => listeners.push(listener),
                None => log::warn!("[parallax] could not listen for '{}'", kind.as_str()),
            }
        };
        bind(target.into(), EventKind::Scroll, &on_scroll);
        bind(EventSource::Window, EventKind::Resize, &on_resize);
        if needs_load_hooks {
            bind(EventSource::Element(media.clone()), EventKind::Load, &on_resize);
            bind(EventSource::Element(media), EventKind::LoadStart, &on_resize);
        }

        self.binding = Some(Binding {
            coalescer,
            debouncer,
            listeners,
        });
        self.inner.refresh_media();
    }
}

impl<H: Host> Drop for Parallax<H> {
    fn drop(&mut self) {
        self.deactivate();
    }
}
