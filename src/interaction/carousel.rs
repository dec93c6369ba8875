//! State machine for the project carousel.
//!
//! The engine owns the current index, the auto-advance progress counter, and
//! the drag/visibility flags. It never touches the DOM; the rendering layer
//! feeds it timer ticks and pointer gestures and reads transforms back out.

/// Milliseconds between automatic-advance ticks.
pub const AUTO_ADVANCE_TICK_MS: u32 = 100;
/// Progress percentage added per tick; a slide lasts `100 / STEP` ticks.
const AUTO_ADVANCE_STEP: u8 = 2;
/// Horizontal drag distance required to commit a slide change on release.
pub const DRAG_RELEASE_THRESHOLD_PX: f64 = 60.0;
/// Scale of a slide one full position away from center.
const SIDE_SCALE: f64 = 0.82;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum StepDirection {
    Back,
    Forward,
}

/// Visual placement of one slide, ready to be formatted into a style string.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SlideTransform {
    pub translate_pct: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl SlideTransform {
    /// Resting placement for a slide at an integer distance from center,
    /// used whenever drag arithmetic produces a non-finite value.
    fn resting(offset: f64) -> Self {
        let distance = offset.abs();
        Self {
            translate_pct: offset * 100.0,
            scale: 1.0 - (1.0 - SIDE_SCALE) * distance.min(1.0),
            opacity: (1.0 - distance).clamp(0.0, 1.0),
        }
    }
}

pub struct CarouselEngine {
    item_count: usize,
    current_index: usize,
    progress: u8,
    dragging: bool,
    visible: bool,
}

impl CarouselEngine {
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            current_index: 0,
            progress: 0,
            dragging: false,
            visible: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// One automatic-advance tick. Inert while hidden or mid-drag. Reaching
    /// 100% wraps the index forward, unlike manual navigation.
    pub fn tick(&mut self) {
        if !self.visible || self.dragging || self.item_count == 0 {
            return;
        }

        self.progress = self.progress.saturating_add(AUTO_ADVANCE_STEP);
        if self.progress >= 100 {
            self.current_index = (self.current_index + 1) % self.item_count;
            self.progress = 0;
        }
    }

    /// Jump straight to a slide. Out-of-range targets are clamped rather
    /// than trusted.
    pub fn go_to(&mut self, index: usize) {
        if self.item_count == 0 {
            return;
        }

        self.current_index = index.min(self.item_count - 1);
        self.progress = 0;
    }

    /// Manual arrow navigation: one position, clamped at the ends.
    pub fn step(&mut self, direction: StepDirection) {
        if self.item_count == 0 {
            return;
        }

        self.current_index = match direction {
            StepDirection::Forward => (self.current_index + 1).min(self.item_count - 1),
            StepDirection::Back => self.current_index.saturating_sub(1),
        };
        self.progress = 0;
    }

    pub fn begin_drag(&mut self) {
        self.dragging = true;
        self.progress = 0;
    }

    /// Ends the drag gesture. A release past the pixel threshold commits one
    /// step against the drag direction; anything shorter snaps back.
    pub fn handle_drag_release(&mut self, offset_px: f64) {
        self.dragging = false;

        if !offset_px.is_finite() {
            return;
        }

        if offset_px <= -DRAG_RELEASE_THRESHOLD_PX {
            self.step(StepDirection::Forward);
        } else if offset_px >= DRAG_RELEASE_THRESHOLD_PX {
            self.step(StepDirection::Back);
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }

        self.visible = visible;
        if !visible {
            self.progress = 0;
        }
    }

    /// Placement of `item_index` given the live drag offset and the track
    /// width. Opacity and scale fall off linearly with distance from center;
    /// a slide more than one position away is fully hidden.
    pub fn slide_transform(
        &self,
        item_index: usize,
        live_drag_px: f64,
        viewport_width: f64,
    ) -> SlideTransform {
        let offset = item_index as f64 - self.current_index as f64;

        let drag_fraction = if self.dragging
            && live_drag_px.is_finite()
            && viewport_width.is_finite()
            && viewport_width > 0.0
        {
            live_drag_px / viewport_width
        } else {
            0.0
        };

        let effective = offset + drag_fraction;
        if !effective.is_finite() {
            return SlideTransform::resting(offset);
        }

        SlideTransform::resting(effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible_engine(item_count: usize) -> CarouselEngine {
        let mut engine = CarouselEngine::new(item_count);
        engine.set_visible(true);
        engine
    }

    #[test]
    fn go_to_lands_on_target_and_resets_progress() {
        let mut engine = visible_engine(5);
        engine.progress = 40;

        for index in 0..5 {
            engine.go_to(index);
            assert_eq!(engine.current_index(), index);
            assert_eq!(engine.progress(), 0);
        }
    }

    #[test]
    fn go_to_clamps_out_of_range_target() {
        let mut engine = visible_engine(3);

        engine.go_to(99);
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn tick_past_full_progress_wraps_forward() {
        let mut engine = visible_engine(4);
        engine.go_to(3);
        engine.progress = 99;

        engine.tick();

        assert_eq!(engine.current_index(), 0, "automatic advance wraps");
        assert_eq!(engine.progress(), 0);
    }

    #[test]
    fn tick_accumulates_progress_without_advancing_early() {
        let mut engine = visible_engine(4);

        engine.tick();

        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.progress(), AUTO_ADVANCE_STEP);
    }

    #[test]
    fn manual_step_clamps_at_both_boundaries() {
        let mut engine = visible_engine(3);

        engine.step(StepDirection::Back);
        engine.step(StepDirection::Back);
        assert_eq!(engine.current_index(), 0);

        engine.go_to(2);
        engine.step(StepDirection::Forward);
        engine.step(StepDirection::Forward);
        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn tick_is_inert_while_hidden() {
        let mut engine = visible_engine(3);
        engine.progress = 42;
        engine.set_visible(false);
        let progress_before = engine.progress();

        engine.tick();

        assert_eq!(engine.progress(), progress_before);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn leaving_visibility_resets_progress() {
        let mut engine = visible_engine(3);
        engine.progress = 42;

        engine.set_visible(false);

        assert_eq!(engine.progress(), 0);
    }

    #[test]
    fn tick_is_inert_while_dragging() {
        let mut engine = visible_engine(3);
        engine.begin_drag();

        engine.tick();

        assert_eq!(engine.progress(), 0);
        assert!(engine.is_dragging());
    }

    #[test]
    fn drag_start_resets_progress() {
        let mut engine = visible_engine(3);
        engine.progress = 80;

        engine.begin_drag();

        assert_eq!(engine.progress(), 0);
    }

    #[test]
    fn drag_release_past_threshold_steps_once() {
        let mut engine = visible_engine(3);

        engine.begin_drag();
        engine.handle_drag_release(-(DRAG_RELEASE_THRESHOLD_PX + 1.0));
        assert_eq!(engine.current_index(), 1);
        assert!(!engine.is_dragging());

        engine.begin_drag();
        engine.handle_drag_release(DRAG_RELEASE_THRESHOLD_PX + 1.0);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn short_drag_release_snaps_back() {
        let mut engine = visible_engine(3);

        engine.begin_drag();
        engine.handle_drag_release(-10.0);

        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn drag_release_clamps_at_boundary() {
        let mut engine = visible_engine(3);
        engine.go_to(2);

        engine.begin_drag();
        engine.handle_drag_release(-500.0);

        assert_eq!(engine.current_index(), 2);
    }

    #[test]
    fn non_finite_drag_release_changes_nothing() {
        let mut engine = visible_engine(3);
        engine.go_to(1);

        engine.begin_drag();
        engine.handle_drag_release(f64::NAN);

        assert_eq!(engine.current_index(), 1);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn centered_slide_has_neutral_transform() {
        let engine = visible_engine(3);

        let transform = engine.slide_transform(0, 0.0, 1280.0);

        assert_eq!(transform.translate_pct, 0.0);
        assert_eq!(transform.scale, 1.0);
        assert_eq!(transform.opacity, 1.0);
    }

    #[test]
    fn adjacent_slide_is_offset_and_faded() {
        let engine = visible_engine(3);

        let transform = engine.slide_transform(1, 0.0, 1280.0);

        assert_eq!(transform.translate_pct, 100.0);
        assert!((transform.scale - SIDE_SCALE).abs() < 1e-9);
        assert_eq!(transform.opacity, 0.0);
    }

    #[test]
    fn far_slide_stays_fully_hidden() {
        let mut engine = visible_engine(5);
        engine.go_to(0);

        let transform = engine.slide_transform(3, 0.0, 1280.0);

        assert_eq!(transform.opacity, 0.0);
    }

    #[test]
    fn zero_width_viewport_ignores_drag_adjustment() {
        let mut engine = visible_engine(3);
        engine.begin_drag();

        let transform = engine.slide_transform(0, 120.0, 0.0);

        assert_eq!(transform.translate_pct, 0.0);
    }

    #[test]
    fn non_finite_drag_value_falls_back_to_resting_transform() {
        let mut engine = visible_engine(3);
        engine.begin_drag();

        let transform = engine.slide_transform(1, f64::NAN, 1280.0);

        assert_eq!(transform, engine.slide_transform(1, 0.0, 1280.0));
    }

    #[test]
    fn empty_carousel_tolerates_every_operation() {
        let mut engine = CarouselEngine::new(0);
        engine.set_visible(true);

        engine.tick();
        engine.go_to(3);
        engine.step(StepDirection::Forward);
        engine.begin_drag();
        engine.handle_drag_release(-500.0);

        assert_eq!(engine.current_index(), 0);
    }
}
