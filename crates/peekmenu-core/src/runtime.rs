use crate::FrameCallbackId;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

type PostFrameCallback = Box<dyn FnOnce(u64) + 'static>;

struct RuntimeInner {
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    post_frame_callbacks: RefCell<Vec<PostFrameCallback>>,
    needs_frame: Cell<bool>,
    current_frame_nanos: Cell<Option<u64>>,
    last_frame_nanos: Cell<u64>,
    frame_count: Cell<u64>,
}

impl RuntimeInner {
    fn new() -> Self {
        Self {
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            post_frame_callbacks: RefCell::new(Vec::new()),
            needs_frame: Cell::new(false),
            current_frame_nanos: Cell::new(None),
            last_frame_nanos: Cell::new(0),
            frame_count: Cell::new(0),
        }
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.needs_frame.set(true);
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        let idle = callbacks.is_empty();
        drop(callbacks);
        if idle && self.post_frame_callbacks.borrow().is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn begin_frame(&self, frame_time_nanos: u64) {
        self.current_frame_nanos.set(Some(frame_time_nanos));
        self.last_frame_nanos.set(frame_time_nanos);
        self.frame_count.set(self.frame_count.get() + 1);

        // Callbacks registered while draining wait for the next frame.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        log::trace!(
            "frame {} at {}ns: {} callbacks",
            self.frame_count.get(),
            frame_time_nanos,
            pending.len()
        );
        for callback in pending {
            callback(frame_time_nanos);
        }
    }

    fn end_frame(&self) {
        let frame_time = self
            .current_frame_nanos
            .take()
            .unwrap_or_else(|| self.last_frame_nanos.get());
        let pending = std::mem::take(&mut *self.post_frame_callbacks.borrow_mut());
        for callback in pending {
            callback(frame_time);
        }
        self.needs_frame.set(
            !self.frame_callbacks.borrow().is_empty()
                || !self.post_frame_callbacks.borrow().is_empty(),
        );
    }
}

/// Owner of the frame runtime. Dropping it invalidates every handle.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new()),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    /// Runs `callback` once the frame currently being produced has been
    /// rendered. Outside a frame it runs at the end of the next one.
    pub fn add_post_frame_callback(&self, callback: impl FnOnce(u64) + 'static) {
        if let Some(inner) = self.inner.upgrade() {
            inner.post_frame_callbacks.borrow_mut().push(Box::new(callback));
            inner.needs_frame.set(true);
        }
    }

    /// Runs the frame callbacks scheduled for this frame.
    pub fn begin_frame(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.begin_frame(frame_time_nanos);
        }
    }

    /// Runs the post-frame callbacks after the host has rendered the frame.
    pub fn end_frame(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.end_frame();
        }
    }

    /// Produces a whole frame without a render in between.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.begin_frame(frame_time_nanos);
        self.end_frame();
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.frame_callbacks.borrow().is_empty())
            .unwrap_or(false)
    }

    pub fn has_post_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.post_frame_callbacks.borrow().is_empty())
            .unwrap_or(false)
    }

    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.needs_frame.get())
            .unwrap_or(false)
    }

    /// Timestamp of the most recent frame, in nanoseconds.
    pub fn last_frame_nanos(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.last_frame_nanos.get())
            .unwrap_or(0)
    }

    pub fn frame_count(&self) -> u64 {
        self.inner
            .upgrade()
            .map(|inner| inner.frame_count.get())
            .unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
