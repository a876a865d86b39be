//! Screen rendering
//!
//! Layout on the 128x64 panel: the gauge in the top-right corner, the
//! stored offset to its left and one text line along the bottom. The text
//! line shows the live readout while sampling and the last calibration
//! prompt otherwise.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use levelwatch_core::config::GaugeGeometry;
use levelwatch_core::gauge::{draw_gauge, GaugeView};
use levelwatch_core::{CalibrationOffset, Prompt};

use super::sh1106::{Sh1106, HEIGHT, WIDTH};

/// Row height of FONT_6X10
const LINE_HEIGHT: i32 = 10;

/// Snapshot of everything the display shows
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    pub view: GaugeView,
    pub prompt: Option<Prompt>,
}

impl Frame {
    pub const fn empty() -> Self {
        Self {
            view: GaugeView {
                offset: CalibrationOffset::ZERO,
                live: None,
            },
            prompt: None,
        }
    }

    pub fn new(view: GaugeView, prompt: Option<Prompt>) -> Self {
        Self { view, prompt }
    }
}

/// Draw a frame into the display buffer
pub fn render<I2C>(display: &mut Sh1106<I2C>, frame: &Frame, geometry: &GaugeGeometry) {
    display.clear_buffer();

    let origin = Point::new(WIDTH as i32 - geometry.size() as i32, 0);
    let _ = draw_gauge(display, origin, geometry, frame.view.live.as_ref());

    let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);

    let mut line: String<22> = String::new();
    let _ = write!(line, "x {}", frame.view.offset.offset_x);
    let _ = Text::with_baseline(&line, Point::zero(), style, Baseline::Top).draw(display);

    line.clear();
    let _ = write!(line, "y {}", frame.view.offset.offset_y);
    let _ = Text::with_baseline(&line, Point::new(0, LINE_HEIGHT), style, Baseline::Top)
        .draw(display);

    let bottom = Point::new(0, HEIGHT as i32 - LINE_HEIGHT);
    match (&frame.view.live, frame.prompt) {
        (Some(reading), _) => {
            let readout = reading.readout();
            let _ = Text::with_baseline(&readout, bottom, style, Baseline::Top).draw(display);
        }
        (None, Some(prompt)) => {
            let _ = Text::with_baseline(prompt.as_str(), bottom, style, Baseline::Top)
                .draw(display);
        }
        (None, None) => {}
    }
}
