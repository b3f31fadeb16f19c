//! Host scheduling seams: per-frame callbacks and one-shot deferred tasks.
//!
//! The controller is host-driven. Requesting a frame or deferring a task
//! only signals intent to the host; when the host fires the callback, it
//! calls back into [`SceneController::on_frame`] or
//! [`SceneController::on_upgrade_due`] with the matching handle.
//!
//! [`SceneController::on_frame`]: crate::controller::SceneController::on_frame
//! [`SceneController::on_upgrade_due`]: crate::controller::SceneController::on_upgrade_due

use crate::ids::{FrameHandle, TaskHandle};
use crate::time::SceneTime;

/// "Run a callback on the next display-refresh opportunity."
///
/// One schedule call produces one callback. The controller re-schedules
/// from within each frame and keeps at most one request outstanding;
/// that single-outstanding rule is the controller's responsibility, not
/// the scheduler's.
pub trait FrameScheduler {
    /// Request the next frame callback.
    fn schedule(&mut self) -> FrameHandle;

    /// Cancel a previously scheduled callback. Handles that already
    /// fired or were never issued are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// One-shot deferred tasks, used for the delayed quality upgrade.
pub trait DeferredTasks {
    /// Arrange a callback after `delay`.
    fn defer(&mut self, delay: SceneTime) -> TaskHandle;

    /// Cancel a pending task. Fired or unknown handles are ignored.
    fn cancel(&mut self, handle: TaskHandle);
}
