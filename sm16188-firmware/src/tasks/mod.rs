//! Embassy async tasks
//!
//! The refresh task owns the panel timing; the scene task only draws into
//! the shared framebuffer.

pub mod refresh;
pub mod scene;

pub use refresh::refresh_task;
pub use scene::scene_task;
