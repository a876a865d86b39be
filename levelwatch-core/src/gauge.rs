//! Gauge model and drawing
//!
//! The renderer only reads: the offset, the last live sample and the tilt
//! map. A sentinel sample means the gauge is drawn without dot or readout.

use core::fmt::Write;

use heapless::String;

use crate::calibration::CalibrationOffset;
use crate::config::GaugeGeometry;
use crate::sensor::RawSample;
use crate::tilt;

/// Capacity of the numeric readout, e.g. `"-12345, -12345, -12345"`
pub const READOUT_LEN: usize = 24;

/// Offset-corrected live reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LiveReading {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl LiveReading {
    /// Correct a sample, or `None` if it carries the sentinel
    pub fn from_sample(sample: &RawSample, offset: &CalibrationOffset) -> Option<Self> {
        if sample.is_sentinel() {
            return None;
        }
        let (x, y, z) = offset.correct(sample);
        Some(Self { x, y, z })
    }

    /// Dot center in gauge coordinates
    ///
    /// Tilting toward +X moves the dot left, toward +Y moves it down.
    pub fn dot(&self, geometry: &GaugeGeometry) -> (i32, i32) {
        let radius = geometry.outer_radius as f32;
        let dx = (radius * tilt::map_axis(self.x, geometry.scale)) as i32;
        let dy = (radius * tilt::map_axis(self.y, geometry.scale)) as i32;
        (geometry.center_x - dx, geometry.center_y + dy)
    }

    /// Numeric readout, `"x, y, z"`
    pub fn readout(&self) -> String<READOUT_LEN> {
        let mut text = String::new();
        // Corrected i16 readings stay within six characters per axis
        let _ = write!(text, "{}, {}, {}", self.x, self.y, self.z);
        text
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GaugeView {
    pub offset: CalibrationOffset,
    pub live: Option<LiveReading>,
}

impl GaugeView {
    pub fn new(offset: CalibrationOffset, last_sample: &RawSample) -> Self {
        Self {
            offset,
            live: LiveReading::from_sample(last_sample, &offset),
        }
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

#[cfg(feature = "graphics")]
pub use self::draw::draw_gauge;

#[cfg(feature = "graphics")]
mod draw {
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::*;
    use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};

    use super::LiveReading;
    use crate::config::GaugeGeometry;

    /// Draw the gauge with its top-left corner at `origin`
    ///
    /// Rings and cross are always drawn; the dot only for a live reading.
    pub fn draw_gauge<D>(
        target: &mut D,
        origin: Point,
        geometry: &GaugeGeometry,
        live: Option<&LiveReading>,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        let center = origin + Point::new(geometry.center_x, geometry.center_y);
        let reach = geometry.outer_radius as i32 - 1;

        Circle::with_center(center, geometry.inner_radius * 2 + 1)
            .into_styled(stroke)
            .draw(target)?;
        Circle::with_center(center, geometry.outer_radius * 2 + 1)
            .into_styled(stroke)
            .draw(target)?;

        Line::new(center - Point::new(0, reach), center + Point::new(0, reach))
            .into_styled(stroke)
            .draw(target)?;
        Line::new(center - Point::new(reach, 0), center + Point::new(reach, 0))
            .into_styled(stroke)
            .draw(target)?;

        if let Some(reading) = live {
            let (x, y) = reading.dot(geometry);
            Circle::with_center(origin + Point::new(x, y), geometry.dot_radius * 2 + 1)
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(x: i32, y: i32, z: i32) -> LiveReading {
        LiveReading { x, y, z }
    }

    #[test]
    fn test_sentinel_is_not_live() {
        let view = GaugeView::new(CalibrationOffset::ZERO, &RawSample::NO_DATA);
        assert!(!view.is_live());
    }

    #[test]
    fn test_live_reading_is_corrected() {
        let offset = CalibrationOffset::new(200, 300);
        let view = GaugeView::new(offset, &RawSample::new(250, 250, 1000));
        assert_eq!(view.live, Some(reading(50, -50, 1000)));
    }

    #[test]
    fn test_level_dot_is_centered() {
        let geometry = GaugeGeometry::default();
        assert_eq!(reading(0, 0, 1000).dot(&geometry), (20, 20));
    }

    #[test]
    fn test_full_tilt_reaches_ring() {
        let geometry = GaugeGeometry::default();
        assert_eq!(reading(1000, 0, 0).dot(&geometry), (0, 20));
        assert_eq!(reading(-1000, 0, 0).dot(&geometry), (40, 20));
        assert_eq!(reading(0, 1000, 0).dot(&geometry), (20, 40));
        // Beyond full scale is clamped
        assert_eq!(reading(0, -4000, 0).dot(&geometry), (20, 0));
    }

    #[test]
    fn test_readout_format() {
        assert_eq!(reading(50, -50, 1000).readout().as_str(), "50, -50, 1000");
    }

    #[test]
    fn test_readout_fits_extremes() {
        let offset = CalibrationOffset::new(i16::MAX as i32, i16::MAX as i32);
        let sample = RawSample::new(i16::MIN, i16::MIN, i16::MIN);
        let live = LiveReading::from_sample(&sample, &offset).unwrap();
        assert_eq!(live.readout().as_str(), "-65535, -65535, -32768");
    }

    #[cfg(feature = "graphics")]
    mod graphics {
        use super::*;
        use embedded_graphics::mock_display::MockDisplay;
        use embedded_graphics::pixelcolor::BinaryColor;
        use embedded_graphics::prelude::*;

        fn render(live: Option<&LiveReading>) -> MockDisplay<BinaryColor> {
            let mut display = MockDisplay::new();
            display.set_allow_overdraw(true);
            draw_gauge(&mut display, Point::zero(), &GaugeGeometry::default(), live)
                .unwrap();
            display
        }

        #[test]
        fn test_rings_and_cross() {
            let display = render(None);
            // Outer ring extremes
            assert_eq!(display.get_pixel(Point::new(20, 0)), Some(BinaryColor::On));
            assert_eq!(display.get_pixel(Point::new(0, 20)), Some(BinaryColor::On));
            // Inner ring
            assert_eq!(display.get_pixel(Point::new(30, 20)), Some(BinaryColor::On));
            // Cross through the center
            assert_eq!(display.get_pixel(Point::new(20, 20)), Some(BinaryColor::On));
            assert_eq!(display.get_pixel(Point::new(20, 35)), Some(BinaryColor::On));
            // Nothing outside the gauge
            assert_eq!(display.get_pixel(Point::new(45, 45)), None);
        }

        #[test]
        fn test_no_dot_without_live_data() {
            let display = render(None);
            // Inside the inner ring, off the cross
            assert_eq!(display.get_pixel(Point::new(25, 25)), None);
        }

        #[test]
        fn test_dot_drawn_for_live_reading() {
            let live = reading(-500, 500, 1000);
            let (x, y) = live.dot(&GaugeGeometry::default());
            assert!(x > 20 && y > 20);

            let display = render(Some(&live));
            assert_eq!(display.get_pixel(Point::new(x, y)), Some(BinaryColor::On));
            assert_eq!(display.get_pixel(Point::new(x + 1, y)), Some(BinaryColor::On));
        }

        #[test]
        fn test_origin_offsets_gauge() {
            let mut display = MockDisplay::new();
            display.set_allow_overdraw(true);
            draw_gauge(
                &mut display,
                Point::new(10, 5),
                &GaugeGeometry::default(),
                None,
            )
            .unwrap();
            assert_eq!(display.get_pixel(Point::new(30, 5)), Some(BinaryColor::On));
            assert_eq!(display.get_pixel(Point::new(20, 5)), None);
        }
    }
}
