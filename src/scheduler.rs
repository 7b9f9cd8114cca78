//! Recurring per-frame work.
//!
//! Anything that has to run every frame (the 3D render loop, the glitter
//! shimmer) registers a [`FrameTask`]. The task stays registered exactly as
//! long as its handle lives; dropping the handle is cancelling it. The app
//! keeps requesting repaints while any task is registered.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    RenderLoop,
    Shimmer,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: HashMap<TaskKind, u64>,
}

/// Shared registry of running frame tasks. Clones share the registry.
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    registry: Arc<Mutex<Registry>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task of `kind`. Returns `None` if one is already running,
    /// so a kind can never be scheduled twice.
    pub fn schedule(&self, kind: TaskKind) -> Option<FrameTask> {
        let mut registry = self.registry.lock();
        if registry.active.contains_key(&kind) {
            log::debug!("{kind:?} already scheduled");
            return None;
        }
        registry.next_id += 1;
        let id = registry.next_id;
        registry.active.insert(kind, id);
        log::debug!("Scheduled {kind:?}");
        Some(FrameTask {
            kind,
            id,
            registry: Arc::clone(&self.registry),
        })
    }

    pub fn is_active(&self, kind: TaskKind) -> bool {
        self.registry.lock().active.contains_key(&kind)
    }

    pub fn active_count(&self) -> usize {
        self.registry.lock().active.len()
    }

    pub fn has_active(&self) -> bool {
        self.active_count() > 0
    }
}

/// Handle to a registered frame task. Unregisters on drop.
#[derive(Debug)]
pub struct FrameTask {
    kind: TaskKind,
    id: u64,
    registry: Arc<Mutex<Registry>>,
}

impl FrameTask {
    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Same as dropping the handle, but reads better at call sites.
    pub fn cancel(self) {}
}

impl Drop for FrameTask {
    fn drop(&mut self) {
        let mut registry = self.registry.lock();
        if registry.active.get(&self.kind) == Some(&self.id) {
            registry.active.remove(&self.kind);
            log::debug!("Cancelled {:?}", self.kind);
        }
    }
}
