//! Project showcase carousel: the engine wired to timers, the visibility
//! gate, and pointer gestures.

use gloo::timers::callback::Interval;
use js_sys::Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, MouseEvent,
    PointerEvent,
};
use yew::prelude::*;

use crate::frontend::cursor::use_interactive_hover;
use crate::frontend::data;
use crate::frontend::viewport_size;
use folio::interaction::carousel::{CarouselEngine, StepDirection, AUTO_ADVANCE_TICK_MS};

/// Share of the container that must be on screen for the gate to open.
const VISIBILITY_RATIO: f64 = 0.3;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

#[derive(Clone, Copy, PartialEq, Default)]
struct CarouselView {
    index: usize,
    progress: u8,
    drag_px: f64,
    visible: bool,
    dragging: bool,
}

impl CarouselView {
    fn of(engine: &CarouselEngine, drag_px: f64) -> Self {
        Self {
            index: engine.current_index(),
            progress: engine.progress(),
            drag_px,
            visible: engine.is_visible(),
            dragging: engine.is_dragging(),
        }
    }
}

fn track_width(container_ref: &NodeRef) -> f64 {
    container_ref
        .cast::<Element>()
        .map(|element| element.get_bounding_client_rect().width())
        .filter(|width| width.is_finite() && *width > 0.0)
        .unwrap_or_else(|| viewport_size().0)
}

#[function_component(ProjectCarousel)]
pub fn project_carousel() -> Html {
    let engine = use_mut_ref(|| CarouselEngine::new(data::PROJECTS.len()));
    let view = use_state_eq(CarouselView::default);
    let drag_origin = use_mut_ref(|| None::<f64>);
    let container_ref = use_node_ref();
    let (on_enter, on_leave) = use_interactive_hover();

    // Visibility gate on the container.
    {
        let engine = engine.clone();
        let view = view.clone();
        let container_ref = container_ref.clone();
        use_effect_with((), move |_| {
            let mut observing: Option<(IntersectionObserver, ObserverCallback)> = None;

            if let Some(element) = container_ref.cast::<Element>() {
                let callback: ObserverCallback =
                    Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                        let mut visible = false;
                        for entry in entries.iter() {
                            if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                                visible = entry.is_intersecting();
                            }
                        }

                        let snapshot = {
                            let mut engine = engine.borrow_mut();
                            engine.set_visible(visible);
                            CarouselView::of(&engine, 0.0)
                        };
                        view.set(snapshot);
                    });

                let options = IntersectionObserverInit::new();
                options.set_threshold(&JsValue::from_f64(VISIBILITY_RATIO));

                if let Ok(observer) = IntersectionObserver::new_with_options(
                    callback.as_ref().unchecked_ref(),
                    &options,
                ) {
                    observer.observe(&element);
                    observing = Some((observer, callback));
                }
            }

            move || {
                if let Some((observer, _callback)) = observing {
                    observer.disconnect();
                }
            }
        });
    }

    // Auto-advance timer; recreated on visibility and drag transitions so a
    // suspended carousel holds no live interval.
    {
        let engine = engine.clone();
        let view_handle = view.clone();
        use_effect_with((view.visible, view.dragging), move |(visible, dragging)| {
            let interval = (*visible && !*dragging).then(|| {
                Interval::new(AUTO_ADVANCE_TICK_MS, move || {
                    let snapshot = {
                        let mut engine = engine.borrow_mut();
                        engine.tick();
                        CarouselView::of(&engine, 0.0)
                    };
                    view_handle.set(snapshot);
                })
            });

            move || drop(interval)
        });
    }

    let go_to = {
        let engine = engine.clone();
        let view = view.clone();
        Callback::from(move |index: usize| {
            let snapshot = {
                let mut engine = engine.borrow_mut();
                engine.go_to(index);
                CarouselView::of(&engine, 0.0)
            };
            view.set(snapshot);
        })
    };

    let step = {
        let engine = engine.clone();
        let view = view.clone();
        Callback::from(move |direction: StepDirection| {
            let snapshot = {
                let mut engine = engine.borrow_mut();
                engine.step(direction);
                CarouselView::of(&engine, 0.0)
            };
            view.set(snapshot);
        })
    };

    let on_pointer_down = {
        let engine = engine.clone();
        let view = view.clone();
        let drag_origin = drag_origin.clone();
        let container_ref = container_ref.clone();
        Callback::from(move |event: PointerEvent| {
            // Capture so the release is seen even when it lands off-track.
            if let Some(element) = container_ref.cast::<Element>() {
                let _ = element.set_pointer_capture(event.pointer_id());
            }

            *drag_origin.borrow_mut() = Some(f64::from(event.client_x()));
            let snapshot = {
                let mut engine = engine.borrow_mut();
                engine.begin_drag();
                CarouselView::of(&engine, 0.0)
            };
            view.set(snapshot);
        })
    };

    let on_pointer_move = {
        let engine = engine.clone();
        let view = view.clone();
        let drag_origin = drag_origin.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = *drag_origin.borrow() else {
                return;
            };
            let drag_px = f64::from(event.client_x()) - origin;
            view.set(CarouselView::of(&engine.borrow(), drag_px));
        })
    };

    let on_pointer_up = {
        let engine = engine.clone();
        let view = view.clone();
        let drag_origin = drag_origin.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(origin) = drag_origin.borrow_mut().take() else {
                return;
            };
            let offset = f64::from(event.client_x()) - origin;
            let snapshot = {
                let mut engine = engine.borrow_mut();
                engine.handle_drag_release(offset);
                CarouselView::of(&engine, 0.0)
            };
            view.set(snapshot);
        })
    };

    // A cancelled gesture snaps back without committing a step.
    let on_pointer_cancel = {
        let engine = engine.clone();
        let view = view.clone();
        let drag_origin = drag_origin.clone();
        Callback::from(move |_event: PointerEvent| {
            if drag_origin.borrow_mut().take().is_none() {
                return;
            }
            let snapshot = {
                let mut engine = engine.borrow_mut();
                engine.handle_drag_release(0.0);
                CarouselView::of(&engine, 0.0)
            };
            view.set(snapshot);
        })
    };

    let width = track_width(&container_ref);
    let slides = data::PROJECTS
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let placement = engine.borrow().slide_transform(index, view.drag_px, width);
            let style = format!(
                "transform: translateX({:.2}%) scale({:.3}); opacity: {:.3};",
                placement.translate_pct, placement.scale, placement.opacity
            );
            let hidden = (index != view.index).to_string();

            html! {
                <article
                    class="carousel-slide"
                    key={item.id}
                    style={style}
                    data-accent={item.accent}
                    aria-hidden={hidden}
                >
                    <h3>{item.title}</h3>
                    <p>{item.summary}</p>
                    <ul class="tag-list">
                        { for item.tags.iter().map(|tag| html! { <li>{*tag}</li> }) }
                    </ul>
                </article>
            }
        })
        .collect::<Html>();

    let dots = (0..data::PROJECTS.len())
        .map(|index| {
            let onclick = {
                let go_to = go_to.clone();
                Callback::from(move |_: MouseEvent| go_to.emit(index))
            };
            let class = classes!("carousel-dot", (index == view.index).then_some("is-active"));
            let label = format!("Go to project {}", index + 1);

            html! {
                <button
                    type="button"
                    class={class}
                    aria-label={label}
                    onclick={onclick}
                    onmouseenter={on_enter.clone()}
                    onmouseleave={on_leave.clone()}
                ></button>
            }
        })
        .collect::<Html>();

    let on_prev = {
        let step = step.clone();
        Callback::from(move |_: MouseEvent| step.emit(StepDirection::Back))
    };
    let on_next = {
        let step = step.clone();
        Callback::from(move |_: MouseEvent| step.emit(StepDirection::Forward))
    };
    let at_start = view.index == 0;
    let at_end = view.index + 1 >= data::PROJECTS.len();

    html! {
        <section class="section-block carousel" aria-labelledby="projects-heading">
            <h2 id="projects-heading">{"Projects"}</h2>
            <div
                class="carousel-viewport"
                ref={container_ref}
                onpointerdown={on_pointer_down}
                onpointermove={on_pointer_move}
                onpointerup={on_pointer_up}
                onpointercancel={on_pointer_cancel}
            >
                { slides }
            </div>
            <div class="carousel-progress" role="presentation">
                <span style={format!("width: {}%;", view.progress)}></span>
            </div>
            <div class="carousel-controls">
                <button
                    type="button"
                    class="carousel-arrow"
                    aria-label="Previous project"
                    disabled={at_start}
                    onclick={on_prev}
                    onmouseenter={on_enter.clone()}
                    onmouseleave={on_leave.clone()}
                >{"←"}</button>
                <div class="carousel-dots">{ dots }</div>
                <button
                    type="button"
                    class="carousel-arrow"
                    aria-label="Next project"
                    disabled={at_end}
                    onclick={on_next}
                    onmouseenter={on_enter}
                    onmouseleave={on_leave}
                >{"→"}</button>
            </div>
        </section>
    }
}
