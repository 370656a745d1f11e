//! Power-on self-test patterns
//!
//! Both patterns block for their whole duration and leave the last frame
//! on the panel. Callers clear the panel afterwards.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_hal::delay::DelayNs;

use marquee_core::config::SelfTestPattern;

use crate::backend::{DisplayError, GraphicsPanel};

/// Spacing between fan lines, in pixels
const LINE_STEP: usize = 4;

/// Pause after each fan
const FAN_PAUSE_MS: u32 = 250;

/// Pause after each line is presented
const LINE_PAUSE_MS: u32 = 1;

/// Spacing between nested rectangles, in pixels
const RECT_STEP: usize = 2;

/// Pause after each rectangle is presented
const RECT_PAUSE_MS: u32 = 20;

/// Run the configured pattern, then hold for `post_delay_ms`
pub fn run<P, D>(
    panel: &mut P,
    delay: &mut D,
    pattern: SelfTestPattern,
    post_delay_ms: u32,
) -> Result<(), DisplayError>
where
    P: GraphicsPanel,
    D: DelayNs,
{
    match pattern {
        SelfTestPattern::None => Ok(()),
        SelfTestPattern::Lines => draw_line_pattern(panel, delay, post_delay_ms),
        SelfTestPattern::Rectangles => draw_rect_pattern(panel, delay, post_delay_ms),
    }
}

/// Four fans of lines, one from each corner
///
/// Each line is presented as it is drawn, so the fan sweeps across the
/// panel.
pub fn draw_line_pattern<P, D>(
    panel: &mut P,
    delay: &mut D,
    post_delay_ms: u32,
) -> Result<(), DisplayError>
where
    P: GraphicsPanel,
    D: DelayNs,
{
    let size = panel.bounding_box().size;
    let (w, h) = (size.width as i32, size.height as i32);
    let (right, bottom) = (w - 1, h - 1);

    let across = || (0..w).step_by(LINE_STEP);
    let down = || (0..h).step_by(LINE_STEP);

    // Top-left corner: to the bottom edge, then to the right edge
    panel.clear_panel()?;
    let origin = Point::new(0, 0);
    for x in across() {
        fan_line(panel, delay, origin, Point::new(x, bottom))?;
    }
    for y in down() {
        fan_line(panel, delay, origin, Point::new(right, y))?;
    }
    delay.delay_ms(FAN_PAUSE_MS);

    // Bottom-left corner: to the top edge, then up the right edge
    panel.clear_panel()?;
    let origin = Point::new(0, bottom);
    for x in across() {
        fan_line(panel, delay, origin, Point::new(x, 0))?;
    }
    for y in down().map(|y| bottom - y) {
        fan_line(panel, delay, origin, Point::new(right, y))?;
    }
    delay.delay_ms(FAN_PAUSE_MS);

    // Bottom-right corner: back along the top edge, then up the left edge
    panel.clear_panel()?;
    let origin = Point::new(right, bottom);
    for x in across().map(|x| right - x) {
        fan_line(panel, delay, origin, Point::new(x, 0))?;
    }
    for y in down().map(|y| bottom - y) {
        fan_line(panel, delay, origin, Point::new(0, y))?;
    }
    delay.delay_ms(FAN_PAUSE_MS);

    // Top-right corner: down the left edge, then along the bottom edge
    panel.clear_panel()?;
    let origin = Point::new(right, 0);
    for y in down() {
        fan_line(panel, delay, origin, Point::new(0, y))?;
    }
    for x in across() {
        fan_line(panel, delay, origin, Point::new(x, bottom))?;
    }
    delay.delay_ms(FAN_PAUSE_MS);

    delay.delay_ms(post_delay_ms);
    Ok(())
}

fn fan_line<P, D>(panel: &mut P, delay: &mut D, from: Point, to: Point) -> Result<(), DisplayError>
where
    P: GraphicsPanel,
    D: DelayNs,
{
    Line::new(from, to)
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(panel)?;
    panel.present()?;
    delay.delay_ms(LINE_PAUSE_MS);
    Ok(())
}

/// Nested rectangle outlines shrinking toward the center
pub fn draw_rect_pattern<P, D>(
    panel: &mut P,
    delay: &mut D,
    post_delay_ms: u32,
) -> Result<(), DisplayError>
where
    P: GraphicsPanel,
    D: DelayNs,
{
    let size = panel.bounding_box().size;
    let style = PrimitiveStyle::with_stroke(BinaryColor::On, 1);

    panel.clear_panel()?;
    for i in (0..size.height / 2).step_by(RECT_STEP) {
        Rectangle::new(
            Point::new(i as i32, i as i32),
            Size::new(size.width - 2 * i, size.height - 2 * i),
        )
        .into_styled(style)
        .draw(panel)?;
        panel.present()?;
        delay.delay_ms(RECT_PAUSE_MS);
    }

    delay.delay_ms(post_delay_ms);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssd1306::Ssd1306;
    use crate::testing::RecordingBus;

    /// Delay that only adds up the requested time
    #[derive(Default)]
    struct CountingDelay {
        total_ns: u64,
        calls: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ns += u64::from(ns);
            self.calls += 1;
        }
    }

    fn oled() -> Ssd1306<RecordingBus> {
        let mut oled = Ssd1306::new(RecordingBus::new());
        oled.init().unwrap();
        oled
    }

    #[test]
    fn test_none_does_nothing() {
        let mut panel = oled();
        let mut delay = CountingDelay::default();
        run(&mut panel, &mut delay, SelfTestPattern::None, 1000).unwrap();
        assert_eq!(delay.calls, 0);
        assert!(panel.framebuffer().is_blank());
    }

    #[test]
    fn test_rect_pattern_timing() {
        let mut panel = oled();
        let mut delay = CountingDelay::default();
        draw_rect_pattern(&mut panel, &mut delay, 1000).unwrap();

        // 16 rectangles on a 64 pixel tall panel
        let expected_ms = 16 * u64::from(RECT_PAUSE_MS) + 1000;
        assert_eq!(delay.total_ns, expected_ms * 1_000_000);

        let fb = panel.framebuffer();
        assert!(fb.pixel(0, 0));
        assert!(fb.pixel(127, 63));
        assert!(fb.pixel(2, 2));
        assert!(!fb.pixel(1, 1));
    }

    #[test]
    fn test_line_pattern_timing() {
        let mut panel = oled();
        let mut delay = CountingDelay::default();
        draw_line_pattern(&mut panel, &mut delay, 500).unwrap();

        // Each fan: 32 lines to a horizontal edge, 16 to a vertical edge
        let lines = 4 * (32 + 16);
        let expected_ms = lines * u64::from(LINE_PAUSE_MS) + 4 * u64::from(FAN_PAUSE_MS) + 500;
        assert_eq!(delay.total_ns, expected_ms * 1_000_000);

        // Last fan starts at the top-right corner
        assert!(panel.framebuffer().pixel(127, 0));
        let commands = panel.release().command_bytes();
        assert!(!commands.is_empty());
    }

    #[test]
    fn test_pattern_stops_on_bus_error() {
        let mut panel = Ssd1306::new(RecordingBus::failing());
        let mut delay = CountingDelay::default();
        // Never initialized, so the first present fails
        assert_eq!(
            run(&mut panel, &mut delay, SelfTestPattern::Lines, 0),
            Err(DisplayError::NotInitialized)
        );
        assert_eq!(delay.calls, 0);
    }
}
