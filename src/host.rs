//! Browser implementation of the core's host traits on top of `web-sys`.
//!
//! Frames come from `requestAnimationFrame`, timers from `setTimeout`. Their
//! one-shot JS closures are owned by the returned handle.

use crate::constants::parse_px;
use parallax_core::{
    Dom, EventBinder, EventKind, EventSource, FrameScheduler, GeometryProbe, ListenOptions,
    MediaSurface, Overflow, ScrollTree, TimerScheduler,
};
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct WebHost {
    window: web::Window,
}

/// A queued animation frame or timeout. The JS closure lives as long as the
/// handle, so cancelling (or dropping) it frees the closure. Dropping it from
/// inside the callback is fine: wasm-bindgen defers the free until the call
/// returns.
pub struct Scheduled {
    id: i32,
    _callback: Closure<dyn FnMut()>,
}

/// A live `addEventListener` registration.
pub struct WebListener {
    target: web::EventTarget,
    kind: EventKind,
    options: ListenOptions,
    closure: Closure<dyn FnMut()>,
}

impl WebHost {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }

    fn computed(&self, el: &web::HtmlElement, property: &str) -> Option<String> {
        self.window
            .get_computed_style(el)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value(property).ok())
    }

    fn event_target(&self, source: &EventSource<web::HtmlElement>) -> web::EventTarget {
        match source {
            EventSource::Window => self.window.clone().into(),
            EventSource::Element(el) => el.clone().into(),
        }
    }
}

impl Dom for WebHost {
    type Element = web::HtmlElement;
}

impl GeometryProbe for WebHost {
    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn offset_top(&self, element: &web::HtmlElement) -> f64 {
        element.get_bounding_client_rect().top()
    }

    fn height(&self, element: &web::HtmlElement) -> f64 {
        self.computed(element, "height")
            .as_deref()
            .and_then(parse_px)
            .unwrap_or_else(|| f64::from(element.offset_height()))
    }
}

impl ScrollTree for WebHost {
    fn parent(&self, element: &web::HtmlElement) -> Option<web::HtmlElement> {
        element
            .parent_element()
            .and_then(|p| p.dyn_into::<web::HtmlElement>().ok())
    }

    fn overflow_y(&self, element: &web::HtmlElement) -> Overflow {
        self.computed(element, "overflow-y")
            .map(|v| Overflow::parse(&v))
            .unwrap_or_default()
    }

    fn has_class(&self, element: &web::HtmlElement, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn is_document_root(&self, element: &web::HtmlElement) -> bool {
        let Some(document) = element.owner_document() else {
            return false;
        };
        let node: &web::Node = element.as_ref();
        document
            .document_element()
            .is_some_and(|root| root.is_same_node(Some(node)))
            || document
                .body()
                .is_some_and(|body| body.is_same_node(Some(node)))
    }
}

impl MediaSurface for WebHost {
    fn natural_height(&self, media: &web::HtmlElement) -> Option<f64> {
        if let Some(img) = media.dyn_ref::<web::HtmlImageElement>() {
            Some(f64::from(img.natural_height()))
        } else {
            media
                .dyn_ref::<web::HtmlVideoElement>()
                .map(|video| f64::from(video.video_height()))
        }
    }

    fn set_transform(&self, media: &web::HtmlElement, transform: &str) {
        if let Err(e) = media.style().set_property("transform", transform) {
            log::warn!("[host] transform not applied: {:?}", e);
        }
    }
}

impl EventBinder for WebHost {
    type Listener = WebListener;

    fn listen(
        &self,
        source: &EventSource<web::HtmlElement>,
        kind: EventKind,
        options: ListenOptions,
        callback: Rc<dyn Fn()>,
    ) -> Option<WebListener> {
        let target = self.event_target(source);
        let closure = Closure::wrap(Box::new(move || callback()) as Box<dyn FnMut()>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(options.passive);
        opts.set_capture(options.capture);
        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind.as_str(),
            closure.as_ref().unchecked_ref(),
            &opts,
        ) {
            log::warn!("[host] addEventListener('{}') failed: {:?}", kind.as_str(), e);
            return None;
        }
        Some(WebListener {
            target,
            kind,
            options,
            closure,
        })
    }

    fn unlisten(&self, listener: WebListener) {
        let opts = web::EventListenerOptions::new();
        opts.set_capture(listener.options.capture);
        let _ = listener
            .target
            .remove_event_listener_with_callback_and_event_listener_options(
                listener.kind.as_str(),
                listener.closure.as_ref().unchecked_ref(),
                &opts,
            );
    }
}

impl FrameScheduler for WebHost {
    type FrameHandle = Scheduled;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<Scheduled> {
        let callback: Closure<dyn FnMut()> = Closure::once(move || callback());
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Scheduled {
            id,
            _callback: callback,
        })
    }

    fn cancel_frame(&self, handle: Scheduled) {
        let _ = self.window.cancel_animation_frame(handle.id);
    }
}

impl TimerScheduler for WebHost {
    type TimerHandle = Scheduled;

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<Scheduled> {
        let callback: Closure<dyn FnMut()> = Closure::once(move || callback());
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay.as_millis() as i32,
            )
            .ok()?;
        Some(Scheduled {
            id,
            _callback: callback,
        })
    }

    fn clear_timeout(&self, handle: Scheduled) {
        self.window.clear_timeout_with_handle(handle.id);
    }
}
