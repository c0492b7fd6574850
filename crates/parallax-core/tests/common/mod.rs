// In-memory stand-ins for the browser: a node tree with fixed geometry, a
// manually pumped frame queue and a virtual millisecond clock.

#![allow(dead_code)]

use parallax_core::{
    Dom, EventBinder, EventKind, EventSource, FrameScheduler, GeometryProbe, ListenOptions,
    MediaSurface, Overflow, ScrollTree, TimerScheduler,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

type Task = Box<dyn FnOnce()>;

#[derive(Default)]
pub struct ManualFrames {
    queue: RefCell<Vec<(u32, Task)>>,
    next_id: Cell<u32>,
    requested: Cell<usize>,
    /// Pretend cancellation failed: cancelled callbacks still run.
    pub ignore_cancel: Cell<bool>,
}

impl ManualFrames {
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn requested(&self) -> usize {
        self.requested.get()
    }

    /// Run everything queued before this frame started.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let n = batch.len();
        for (_, task) in batch {
            task();
        }
        n
    }
}

impl FrameScheduler for ManualFrames {
    type FrameHandle = u32;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<u32> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.requested.set(self.requested.get() + 1);
        self.queue.borrow_mut().push((id, callback));
        Some(id)
    }

    fn cancel_frame(&self, handle: u32) {
        if !self.ignore_cancel.get() {
            self.queue.borrow_mut().retain(|(id, _)| *id != handle);
        }
    }
}

#[derive(Default)]
pub struct VirtualClock {
    now_ms: Cell<u64>,
    timers: RefCell<Vec<(u32, u64, Task)>>,
    next_id: Cell<u32>,
}

impl VirtualClock {
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Move time forward, firing due timers in order.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, (_, at, _))| *at <= target)
                    .min_by_key(|(_, (id, at, _))| (*at, *id))
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            let Some((_, at, task)) = next else {
                break;
            };
            self.now_ms.set(at);
            task();
        }
        self.now_ms.set(target);
    }
}

impl TimerScheduler for VirtualClock {
    type TimerHandle = u32;

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<u32> {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let due = self.now_ms.get() + delay.as_millis() as u64;
        self.timers.borrow_mut().push((id, due, callback));
        Some(id)
    }

    fn clear_timeout(&self, handle: u32) {
        self.timers.borrow_mut().retain(|(id, _, _)| *id != handle);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Default)]
struct FakeNode {
    parent: Option<NodeId>,
    overflow: Overflow,
    classes: Vec<String>,
    top: f64,
    height: f64,
    natural_height: Option<f64>,
    document_root: bool,
}

struct Registration {
    id: u32,
    source: EventSource<NodeId>,
    kind: EventKind,
    options: ListenOptions,
    callback: Rc<dyn Fn()>,
}

pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    viewport_height: Cell<f64>,
    listeners: RefCell<Vec<Registration>>,
    next_listener: Cell<u32>,
    removed: RefCell<Vec<(EventSource<NodeId>, EventKind, ListenOptions)>>,
    transforms: RefCell<Vec<(NodeId, String)>>,
    pub frames: ManualFrames,
    pub clock: VirtualClock,
}

impl FakeDom {
    pub fn new(viewport_height: f64) -> Rc<Self> {
        Rc::new(Self {
            nodes: RefCell::new(Vec::new()),
            viewport_height: Cell::new(viewport_height),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            removed: RefCell::new(Vec::new()),
            transforms: RefCell::new(Vec::new()),
            frames: ManualFrames::default(),
            clock: VirtualClock::default(),
        })
    }

    pub fn add_node(&self, parent: Option<NodeId>) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode {
            parent,
            ..FakeNode::default()
        });
        NodeId(nodes.len() - 1)
    }

    pub fn set_box(&self, id: NodeId, top: f64, height: f64) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[id.0].top = top;
        nodes[id.0].height = height;
    }

    pub fn set_top(&self, id: NodeId, top: f64) {
        self.nodes.borrow_mut()[id.0].top = top;
    }

    pub fn set_overflow(&self, id: NodeId, overflow: Overflow) {
        self.nodes.borrow_mut()[id.0].overflow = overflow;
    }

    pub fn add_class(&self, id: NodeId, class: &str) {
        self.nodes.borrow_mut()[id.0].classes.push(class.to_string());
    }

    pub fn set_natural_height(&self, id: NodeId, height: Option<f64>) {
        self.nodes.borrow_mut()[id.0].natural_height = height;
    }

    /// Mark a node as `<html>` / `<body>`.
    pub fn mark_document_root(&self, id: NodeId) {
        self.nodes.borrow_mut()[id.0].document_root = true;
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }

    /// Fire an event at every matching listener. Returns how many ran.
    pub fn dispatch(&self, source: &EventSource<NodeId>, kind: EventKind) -> usize {
        let callbacks: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|r| &r.source == source && r.kind == kind)
            .map(|r| r.callback.clone())
            .collect();
        for cb in &callbacks {
            cb();
        }
        callbacks.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn listens(&self, source: &EventSource<NodeId>, kind: EventKind) -> Option<ListenOptions> {
        self.listeners
            .borrow()
            .iter()
            .find(|r| &r.source == source && r.kind == kind)
            .map(|r| r.options)
    }

    pub fn removed(&self) -> Vec<(EventSource<NodeId>, EventKind, ListenOptions)> {
        self.removed.borrow().clone()
    }

    pub fn transform_writes(&self) -> usize {
        self.transforms.borrow().len()
    }

    pub fn last_transform(&self) -> Option<String> {
        self.transforms.borrow().last().map(|(_, t)| t.clone())
    }
}

impl Dom for FakeDom {
    type Element = NodeId;
}

impl GeometryProbe for FakeDom {
    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn offset_top(&self, element: &NodeId) -> f64 {
        self.nodes.borrow()[element.0].top
    }

    fn height(&self, element: &NodeId) -> f64 {
        self.nodes.borrow()[element.0].height
    }
}

impl ScrollTree for FakeDom {
    fn parent(&self, element: &NodeId) -> Option<NodeId> {
        self.nodes.borrow()[element.0].parent
    }

    fn overflow_y(&self, element: &NodeId) -> Overflow {
        self.nodes.borrow()[element.0].overflow
    }

    fn has_class(&self, element: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[element.0]
            .classes
            .iter()
            .any(|c| c == class)
    }

    fn is_document_root(&self, element: &NodeId) -> bool {
        self.nodes.borrow()[element.0].document_root
    }
}

impl MediaSurface for FakeDom {
    fn natural_height(&self, media: &NodeId) -> Option<f64> {
        self.nodes.borrow()[media.0].natural_height
    }

    fn set_transform(&self, media: &NodeId, transform: &str) {
        self.transforms
            .borrow_mut()
            .push((*media, transform.to_string()));
    }
}

impl EventBinder for FakeDom {
    type Listener = u32;

    fn listen(
        &self,
        source: &EventSource<NodeId>,
        kind: EventKind,
        options: ListenOptions,
        callback: Rc<dyn Fn()>,
    ) -> Option<u32> {
        let id = self.next_listener.get() + 1;
        self.next_listener.set(id);
        self.listeners.borrow_mut().push(Registration {
            id,
            source: source.clone(),
            kind,
            options,
            callback,
        });
        Some(id)
    }

    fn unlisten(&self, listener: u32) {
        let mut listeners = self.listeners.borrow_mut();
        if let Some(i) = listeners.iter().position(|r| r.id == listener) {
            let r = listeners.remove(i);
            self.removed
                .borrow_mut()
                .push((r.source, r.kind, r.options));
        }
    }
}

impl FrameScheduler for FakeDom {
    type FrameHandle = u32;

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Option<u32> {
        self.frames.request_frame(callback)
    }

    fn cancel_frame(&self, handle: u32) {
        self.frames.cancel_frame(handle)
    }
}

impl TimerScheduler for FakeDom {
    type TimerHandle = u32;

    fn set_timeout(&self, callback: Box<dyn FnOnce()>, delay: Duration) -> Option<u32> {
        self.clock.set_timeout(callback, delay)
    }

    fn clear_timeout(&self, handle: u32) {
        self.clock.clear_timeout(handle)
    }
}
