//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod accel;
pub mod controller;
pub mod display;
pub mod persistence;
pub mod tick;

pub use accel::accel_task;
pub use controller::controller_task;
pub use display::display_task;
pub use persistence::persistence_task;
pub use tick::tick_task;
