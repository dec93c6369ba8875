//! The floating cursor indicator and the shared pointer plumbing.
//!
//! One `PointerHandle` is provided at the app root; the global listeners
//! write into it and the cursor loop reads from it once per display frame.
//! Interactive elements opt in to the hover affordance explicitly through
//! [`use_interactive_hover`] instead of the cursor inspecting the tree.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::render::{request_animation_frame, AnimationFrame};
use web_sys::{HtmlElement, MouseEvent};
use yew::prelude::*;

use crate::frontend::prefers_reduced_motion;
use folio::interaction::pointer::{follow, PointerState};

const CURSOR_FOLLOW_SMOOTHING: f64 = 0.22;

/// Shared handle to the freshest pointer state. Cheap to clone; all clones
/// see the same snapshot.
#[derive(Clone, Default)]
pub struct PointerHandle(Rc<RefCell<PointerState>>);

impl PartialEq for PointerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PointerHandle {
    pub fn get(&self) -> PointerState {
        *self.0.borrow()
    }

    pub fn with(&self, apply: impl FnOnce(&mut PointerState)) {
        apply(&mut self.0.borrow_mut());
    }
}

/// Single-event, payload-free reset channel. A closing modal broadcasts and
/// the cursor snaps back to its default visual state.
#[derive(Clone, Default)]
pub struct CursorResetBus {
    subscribers: Rc<RefCell<Vec<Callback<()>>>>,
}

impl PartialEq for CursorResetBus {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.subscribers, &other.subscribers)
    }
}

impl CursorResetBus {
    pub fn subscribe(&self, callback: Callback<()>) {
        self.subscribers.borrow_mut().push(callback);
    }

    pub fn broadcast(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for callback in subscribers {
            callback.emit(());
        }
    }
}

/// Hover callbacks for an element that should light the cursor up. Attach
/// both to any clickable surface.
#[hook]
pub fn use_interactive_hover() -> (Callback<MouseEvent>, Callback<MouseEvent>) {
    let pointer = use_context::<PointerHandle>().unwrap_or_default();

    let on_enter = {
        let pointer = pointer.clone();
        Callback::from(move |_: MouseEvent| pointer.with(|state| state.over_interactive = true))
    };
    let on_leave =
        Callback::from(move |_: MouseEvent| pointer.with(|state| state.over_interactive = false));

    (on_enter, on_leave)
}

fn cursor_visual_state(pointer: PointerState) -> &'static str {
    if pointer.pressed {
        "pressed"
    } else if pointer.over_interactive {
        "interactive"
    } else {
        "idle"
    }
}

fn apply_cursor_frame(element: &HtmlElement, x: f64, y: f64, state: &'static str) {
    let style = format!("transform: translate3d({x:.2}px, {y:.2}px, 0);");
    let _ = element.set_attribute("style", &style);
    let _ = element.set_attribute("data-state", state);
}

fn schedule_cursor_frame(
    frame: Rc<RefCell<Option<AnimationFrame>>>,
    node_ref: NodeRef,
    pointer: PointerHandle,
    position: Rc<RefCell<(f64, f64)>>,
) {
    let frame_slot = frame.clone();
    let handle = request_animation_frame(move |_timestamp| {
        frame_slot.borrow_mut().take();

        let target = pointer.get();
        {
            let mut position = position.borrow_mut();
            position.0 = follow(position.0, target.x, CURSOR_FOLLOW_SMOOTHING);
            position.1 = follow(position.1, target.y, CURSOR_FOLLOW_SMOOTHING);

            if let Some(element) = node_ref.cast::<HtmlElement>() {
                apply_cursor_frame(&element, position.0, position.1, cursor_visual_state(target));
            }
        }

        schedule_cursor_frame(
            frame_slot.clone(),
            node_ref.clone(),
            pointer.clone(),
            position.clone(),
        );
    });
    *frame.borrow_mut() = Some(handle);
}

#[function_component(FloatingCursor)]
pub fn floating_cursor() -> Html {
    let pointer = use_context::<PointerHandle>().unwrap_or_default();
    let reset_bus = use_context::<CursorResetBus>().unwrap_or_default();
    let node_ref = use_node_ref();

    {
        let pointer = pointer.clone();
        let node_ref = node_ref.clone();
        use_effect_with((), move |_| {
            let frame: Rc<RefCell<Option<AnimationFrame>>> = Rc::new(RefCell::new(None));

            if !prefers_reduced_motion() {
                let start = PointerState::default();
                schedule_cursor_frame(
                    frame.clone(),
                    node_ref,
                    pointer,
                    Rc::new(RefCell::new((start.x, start.y))),
                );
            }

            // Dropping the handle cancels the pending frame.
            move || {
                frame.borrow_mut().take();
            }
        });
    }

    {
        let node_ref = node_ref.clone();
        use_effect_with((), move |_| {
            reset_bus.subscribe(Callback::from(move |_| {
                pointer.with(PointerState::clear_affordances);
                if let Some(element) = node_ref.cast::<HtmlElement>() {
                    let _ = element.set_attribute("data-state", "idle");
                }
            }));
            || ()
        });
    }

    html! {
        <div class="floating-cursor" data-state="idle" ref={node_ref} aria-hidden="true"></div>
    }
}
