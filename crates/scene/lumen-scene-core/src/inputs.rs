//! Host signals consumed by the controller.
//!
//! Adapters translate their event sources (DOM listeners, a test
//! harness, a native event loop) into these inputs and feed them to
//! [`SceneController::apply`]. The controller itself never subscribes to
//! anything.
//!
//! [`SceneController::apply`]: crate::controller::SceneController::apply

use serde::{Deserialize, Serialize};

use crate::ids::TaskHandle;
use crate::surface::Viewport;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SceneInput {
    /// Pointer moved. Coordinates are normalized to [-1, 1] per axis
    /// with the viewport centre at the origin.
    PointerMoved { x: f32, y: f32 },
    /// The scene's container changed size.
    Resized { viewport: Viewport },
    /// Page visibility flipped; `hidden` mirrors the host document
    /// state. Hidden pauses, visible resumes.
    VisibilityChanged { hidden: bool },
    /// A deferred task scheduled by the controller fired.
    TaskFired { task: TaskHandle },
}
