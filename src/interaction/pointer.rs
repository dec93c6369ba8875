//! Latest-pointer bookkeeping and the eased follow used by the floating
//! cursor.

/// Viewport-relative pointer snapshot. Written by the global pointer
/// listeners, read by the cursor loop and the parallax provider.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub pressed: bool,
    pub over_interactive: bool,
}

impl Default for PointerState {
    fn default() -> Self {
        // Parked off-screen until the first real pointer event arrives.
        Self {
            x: -100.0,
            y: -100.0,
            pressed: false,
            over_interactive: false,
        }
    }
}

impl PointerState {
    pub fn move_to(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.x = x;
            self.y = y;
        }
    }

    /// Drops hover and press state, returning the pointer to its default
    /// visual affordance. Used by the cursor reset broadcast.
    pub fn clear_affordances(&mut self) {
        self.pressed = false;
        self.over_interactive = false;
    }
}

/// One step of exponential ease toward `target`. Settles exactly on the
/// target once within a subpixel of it so the animation can stop.
pub fn follow(current: f64, target: f64, smoothing: f64) -> f64 {
    if !target.is_finite() {
        return current;
    }
    if !current.is_finite() {
        return target;
    }

    let smoothing = smoothing.clamp(0.0, 1.0);
    let next = current + (target - current) * smoothing;

    if (next - target).abs() < 0.1 {
        target
    } else {
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_to_updates_coordinates() {
        let mut pointer = PointerState::default();

        pointer.move_to(120.0, 48.0);

        assert_eq!(pointer.x, 120.0);
        assert_eq!(pointer.y, 48.0);
    }

    #[test]
    fn move_to_ignores_non_finite_coordinates() {
        let mut pointer = PointerState::default();
        pointer.move_to(120.0, 48.0);

        pointer.move_to(f64::NAN, 50.0);

        assert_eq!(pointer.x, 120.0);
        assert_eq!(pointer.y, 48.0);
    }

    #[test]
    fn clear_affordances_resets_flags_only() {
        let mut pointer = PointerState::default();
        pointer.move_to(10.0, 20.0);
        pointer.pressed = true;
        pointer.over_interactive = true;

        pointer.clear_affordances();

        assert!(!pointer.pressed);
        assert!(!pointer.over_interactive);
        assert_eq!(pointer.x, 10.0);
    }

    #[test]
    fn follow_converges_monotonically() {
        let mut position = 0.0;
        let target = 100.0;

        for _ in 0..200 {
            let next = follow(position, target, 0.2);
            assert!(next >= position);
            position = next;
        }

        assert_eq!(position, target);
    }

    #[test]
    fn follow_settles_when_close() {
        assert_eq!(follow(99.95, 100.0, 0.2), 100.0);
    }

    #[test]
    fn follow_with_non_finite_current_jumps_to_target() {
        assert_eq!(follow(f64::NAN, 42.0, 0.2), 42.0);
    }

    #[test]
    fn follow_with_non_finite_target_holds_position() {
        assert_eq!(follow(42.0, f64::INFINITY, 0.2), 42.0);
    }
}
