//! Frame-throttled parallax styling for sections.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::window;
use yew::prelude::*;

use crate::frontend::cursor::PointerHandle;
use crate::frontend::{prefers_reduced_motion, viewport_size};
use folio::interaction::parallax::{section_shift, ParallaxShift};

fn current_scroll_y() -> f64 {
    window()
        .and_then(|win| win.scroll_y().ok())
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Style string for a section that drifts with the pointer and scroll
/// position at the given speed multiplier.
///
/// Pointer and scroll events only mark work pending; the shift itself is
/// computed at most once per animation frame, and not at all under a
/// reduced-motion preference.
#[hook]
pub fn use_parallax(speed: f64) -> String {
    let pointer = use_context::<PointerHandle>().unwrap_or_default();
    let shift = use_state_eq(|| ParallaxShift::IDENTITY);

    {
        let shift = shift.clone();
        use_effect_with((), move |_| {
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));
            let mut listeners: Vec<EventListener> = Vec::new();

            if !prefers_reduced_motion() {
                if let Some(win) = window() {
                    let schedule = {
                        let frame = frame.clone();
                        Rc::new(move || {
                            // One pending frame at a time; extra events coalesce.
                            if frame.borrow().is_some() {
                                return;
                            }

                            let frame_slot = frame.clone();
                            let shift = shift.clone();
                            let pointer = pointer.clone();
                            let handle = request_animation_frame(move |_timestamp| {
                                frame_slot.borrow_mut().take();

                                let target = pointer.get();
                                let (width, height) = viewport_size();
                                shift.set(section_shift(
                                    target.x,
                                    target.y,
                                    width,
                                    height,
                                    current_scroll_y(),
                                    speed,
                                ));
                            });
                            *frame.borrow_mut() = Some(handle);
                        })
                    };

                    for event_name in ["pointermove", "scroll"] {
                        let schedule = schedule.clone();
                        listeners.push(EventListener::new(&win, event_name, move |_event| {
                            schedule();
                        }));
                    }
                }
            }

            move || {
                drop(listeners);
                frame.borrow_mut().take();
            }
        });
    }

    (*shift).css()
}
