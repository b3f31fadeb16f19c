//! Lumen hero scene core (host-agnostic)
//!
//! Lifecycle, scheduling and motion logic for the site's hero 3D scene:
//! a capability probe gates construction, a controller owns the render
//! surface and per-frame pose, a one-shot deferred task raises particle
//! density after an idle delay, and page visibility pauses and resumes
//! the frame loop. Rendering itself, DOM access and timers live behind
//! traits implemented by adapters.

pub mod clock;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod ids;
pub mod inputs;
pub mod motion;
pub mod probe;
pub mod schedule;
pub mod state;
pub mod surface;
pub mod testing;
pub mod time;

// Re-exports for consumers (adapters)
pub use clock::SceneClock;
pub use config::SceneConfig;
pub use controller::SceneController;
pub use error::SceneError;
pub use events::{SceneEvent, SceneEvents};
pub use ids::{FrameHandle, HandleAllocator, TaskHandle};
pub use inputs::SceneInput;
pub use probe::{CapabilityProbe, CapabilityReport};
pub use schedule::{DeferredTasks, FrameScheduler};
pub use state::ScenePhase;
pub use surface::{RenderSurface, ScenePose, SurfaceProvider, Viewport};
pub use time::SceneTime;
