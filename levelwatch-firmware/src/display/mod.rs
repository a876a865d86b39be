//! SH1106 OLED display
//!
//! The panel is a 128x64 SH1106 on its own I2C bus. Drawing goes into a
//! page buffer through embedded-graphics; `flush` pushes it to the panel.

pub mod renderer;
pub mod sh1106;

pub use renderer::{render, Frame};
pub use sh1106::Sh1106;
