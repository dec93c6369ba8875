//! Parallax shift computation.
//!
//! Stateless: every animation frame the caller feeds the freshest pointer
//! position and scroll offset through [`section_shift`] and applies the
//! result as a style. Throttling to one call per frame is the caller's job;
//! an unthrottled caller wastes layout work but stays correct.

/// Largest pointer-driven displacement at speed 1.0, in pixels.
const MAX_POINTER_SHIFT_PX: f64 = 24.0;
/// Scroll distance for one full oscillation cycle, in pixels.
const OSCILLATION_PERIOD_PX: f64 = 900.0;
/// Peak of the scroll-derived oscillation at speed 1.0, in pixels.
const OSCILLATION_AMPLITUDE_PX: f64 = 10.0;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParallaxShift {
    pub x: f64,
    pub y: f64,
}

impl ParallaxShift {
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0 };

    pub fn css(&self) -> String {
        format!("transform: translate3d({:.2}px, {:.2}px, 0);", self.x, self.y)
    }
}

/// Displacement for a section with the given speed multiplier.
///
/// The pointer term is proportional to the pointer's distance from the
/// viewport center; the vertical term adds an oscillation derived from the
/// scroll offset. Speed 0 and any non-finite or degenerate input produce the
/// identity shift — a visual glitch is never worth a crash here.
pub fn section_shift(
    pointer_x: f64,
    pointer_y: f64,
    viewport_width: f64,
    viewport_height: f64,
    scroll_y: f64,
    speed: f64,
) -> ParallaxShift {
    let inputs = [pointer_x, pointer_y, viewport_width, viewport_height, scroll_y, speed];
    if inputs.iter().any(|value| !value.is_finite()) {
        return ParallaxShift::IDENTITY;
    }
    if viewport_width <= 0.0 || viewport_height <= 0.0 {
        return ParallaxShift::IDENTITY;
    }

    let centered_x = (pointer_x / viewport_width - 0.5).clamp(-0.5, 0.5);
    let centered_y = (pointer_y / viewport_height - 0.5).clamp(-0.5, 0.5);
    let wave = (scroll_y / OSCILLATION_PERIOD_PX * std::f64::consts::TAU).sin()
        * OSCILLATION_AMPLITUDE_PX;

    let shift = ParallaxShift {
        x: centered_x * MAX_POINTER_SHIFT_PX * speed,
        y: (centered_y * MAX_POINTER_SHIFT_PX + wave) * speed,
    };

    if shift.x.is_finite() && shift.y.is_finite() {
        shift
    } else {
        ParallaxShift::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_speed_is_identity_regardless_of_pointer() {
        let shift = section_shift(977.0, 12.0, 1280.0, 720.0, 0.0, 0.0);

        assert_eq!(shift, ParallaxShift::IDENTITY);
    }

    #[test]
    fn centered_pointer_with_zero_scroll_is_identity() {
        let shift = section_shift(640.0, 360.0, 1280.0, 720.0, 0.0, 1.0);

        assert_eq!(shift, ParallaxShift::IDENTITY);
    }

    #[test]
    fn pointer_right_of_center_shifts_right() {
        let shift = section_shift(1280.0, 360.0, 1280.0, 720.0, 0.0, 1.0);

        assert!((shift.x - MAX_POINTER_SHIFT_PX * 0.5).abs() < 1e-9);
        assert_eq!(shift.y, 0.0);
    }

    #[test]
    fn shift_scales_with_speed() {
        let full = section_shift(1280.0, 720.0, 1280.0, 720.0, 0.0, 1.0);
        let half = section_shift(1280.0, 720.0, 1280.0, 720.0, 0.0, 0.5);

        assert!((half.x - full.x * 0.5).abs() < 1e-9);
        assert!((half.y - full.y * 0.5).abs() < 1e-9);
    }

    #[test]
    fn pointer_outside_viewport_is_clamped() {
        let inside = section_shift(1280.0, 360.0, 1280.0, 720.0, 0.0, 1.0);
        let outside = section_shift(5000.0, 360.0, 1280.0, 720.0, 0.0, 1.0);

        assert_eq!(inside, outside);
    }

    #[test]
    fn scroll_quarter_period_adds_full_oscillation() {
        let shift = section_shift(
            640.0,
            360.0,
            1280.0,
            720.0,
            OSCILLATION_PERIOD_PX / 4.0,
            1.0,
        );

        assert!((shift.y - OSCILLATION_AMPLITUDE_PX).abs() < 1e-9);
    }

    #[test]
    fn degenerate_viewport_is_identity() {
        assert_eq!(
            section_shift(10.0, 10.0, 0.0, 720.0, 0.0, 1.0),
            ParallaxShift::IDENTITY
        );
        assert_eq!(
            section_shift(10.0, 10.0, 1280.0, -5.0, 0.0, 1.0),
            ParallaxShift::IDENTITY
        );
    }

    #[test]
    fn non_finite_input_is_identity() {
        assert_eq!(
            section_shift(f64::NAN, 10.0, 1280.0, 720.0, 0.0, 1.0),
            ParallaxShift::IDENTITY
        );
        assert_eq!(
            section_shift(10.0, 10.0, 1280.0, 720.0, f64::INFINITY, 1.0),
            ParallaxShift::IDENTITY
        );
    }

    #[test]
    fn css_renders_translate3d() {
        let shift = ParallaxShift { x: 1.5, y: -2.0 };

        assert_eq!(shift.css(), "transform: translate3d(1.50px, -2.00px, 0);");
    }
}
