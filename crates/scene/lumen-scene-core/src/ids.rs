//! Handles for scheduled frames and deferred tasks.

use serde::{Deserialize, Serialize};

/// Identifies one scheduled frame callback. Opaque to the controller; a
/// host scheduler may wrap its own callback id (browser frame ids are
/// positive, so they round-trip through `u32`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u32);

/// Identifies one deferred task. The controller stores the handle of the
/// pending quality upgrade and compares it when the task fires, so a
/// cancelled or superseded task is ignored instead of applying late.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u32);

/// Monotonic allocator for frame and task handles, for scheduler
/// implementations that have no host id to wrap.
#[derive(Default, Debug)]
pub struct HandleAllocator {
    next_frame: u32,
    next_task: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_frame(&mut self) -> FrameHandle {
        let id = FrameHandle(self.next_frame);
        self.next_frame = self.next_frame.wrapping_add(1);
        id
    }

    #[inline]
    pub fn alloc_task(&mut self) -> TaskHandle {
        let id = TaskHandle(self.next_task);
        self.next_task = self.next_task.wrapping_add(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.alloc_frame(), FrameHandle(0));
        assert_eq!(alloc.alloc_frame(), FrameHandle(1));
        assert_eq!(alloc.alloc_task(), TaskHandle(0));
        assert_eq!(alloc.alloc_task(), TaskHandle(1));
    }
}
