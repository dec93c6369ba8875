//! Yew frontend: page composition plus the DOM helpers every interactive
//! piece shares.

mod carousel;
mod contact;
mod cursor;
mod data;
mod parallax;
mod theme;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{window, MouseEvent, PointerEvent};
use yew::prelude::*;

use carousel::ProjectCarousel;
use contact::ContactModal;
use cursor::{use_interactive_hover, CursorResetBus, FloatingCursor, PointerHandle};
use data::TimelineEntry;
use parallax::use_parallax;
use theme::ThemeToggle;

pub(crate) fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

pub(crate) fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|win| {
            win.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|query| query.matches())
        .unwrap_or(false)
}

#[function_component(HeroSection)]
fn hero_section() -> Html {
    let style = use_parallax(0.8);

    html! {
        <section class="section-block hero" aria-labelledby="about-heading" style={style}>
            <h2 id="about-heading">{"About"}</h2>
            <p class="hero-bio">{data::BIO}</p>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct TimelineSectionProps {
    id: AttrValue,
    heading: AttrValue,
    entries: &'static [TimelineEntry],
    speed: f64,
}

#[function_component(TimelineSection)]
fn timeline_section(props: &TimelineSectionProps) -> Html {
    let style = use_parallax(props.speed);
    let heading_id = format!("{}-heading", props.id);

    html! {
        <section
            class="section-block timeline"
            id={props.id.clone()}
            aria-labelledby={heading_id.clone()}
            style={style}
        >
            <h2 id={heading_id}>{props.heading.clone()}</h2>
            <ol class="timeline-list">
                { for props.entries.iter().map(|entry| html! {
                    <li class="timeline-entry">
                        <span class="timeline-period">{entry.period}</span>
                        <div class="timeline-body">
                            <h3>{entry.title}</h3>
                            <p class="timeline-org">{entry.organization}</p>
                            <p>{entry.detail}</p>
                        </div>
                    </li>
                }) }
            </ol>
        </section>
    }
}

#[function_component(ContactSection)]
fn contact_section() -> Html {
    let open = use_state(|| false);
    let (on_enter, on_leave) = use_interactive_hover();

    let on_open = {
        let open = open.clone();
        Callback::from(move |_: MouseEvent| open.set(true))
    };
    let on_close = {
        let open = open.clone();
        Callback::from(move |_: ()| open.set(false))
    };

    html! {
        <section class="section-block contact" aria-labelledby="contact-cta-heading">
            <h2 id="contact-cta-heading">{"Contact"}</h2>
            <p>{"Have a project that should exist? Tell me about it."}</p>
            <button
                type="button"
                class="contact-open"
                onclick={on_open}
                onmouseenter={on_enter}
                onmouseleave={on_leave}
            >{"Get in touch"}</button>
            <ContactModal open={*open} on_close={on_close} />
        </section>
    }
}

#[function_component(App)]
fn app() -> Html {
    let pointer = use_state(PointerHandle::default);
    let reset_bus = use_state(CursorResetBus::default);

    // One listener set for the whole page; every consumer reads the shared
    // handle instead of attaching its own move listener.
    {
        let pointer = (*pointer).clone();
        use_effect_with((), move |_| {
            let mut listeners = Vec::new();

            if let Some(win) = window() {
                listeners.push(EventListener::new(&win, "pointermove", {
                    let pointer = pointer.clone();
                    move |event| {
                        if let Some(event) = event.dyn_ref::<PointerEvent>() {
                            pointer.with(|state| {
                                state.move_to(
                                    f64::from(event.client_x()),
                                    f64::from(event.client_y()),
                                );
                            });
                        }
                    }
                }));
                listeners.push(EventListener::new(&win, "pointerdown", {
                    let pointer = pointer.clone();
                    move |_event| pointer.with(|state| state.pressed = true)
                }));
                listeners.push(EventListener::new(&win, "pointerup", {
                    let pointer = pointer.clone();
                    move |_event| pointer.with(|state| state.pressed = false)
                }));
            }

            move || drop(listeners)
        });
    }

    html! {
        <ContextProvider<PointerHandle> context={(*pointer).clone()}>
        <ContextProvider<CursorResetBus> context={(*reset_bus).clone()}>
            <div class="page-shell">
                <header class="site-header" aria-labelledby="identity-heading">
                    <h1 id="identity-heading">{data::SITE_NAME}</h1>
                    <ThemeToggle />
                </header>
                <main id="content">
                    <HeroSection />
                    <TimelineSection id="work" heading="Work" entries={data::WORK} speed={0.6} />
                    <TimelineSection id="education" heading="Education" entries={data::EDUCATION} speed={0.45} />
                    <TimelineSection id="philanthropy" heading="Philanthropy" entries={data::PHILANTHROPY} speed={0.3} />
                    <ProjectCarousel />
                    <ContactSection />
                </main>
            </div>
            <FloatingCursor />
        </ContextProvider<CursorResetBus>>
        </ContextProvider<PointerHandle>>
    }
}

pub fn run() {
    yew::Renderer::<App>::with_root(
        window()
            .and_then(|win| win.document())
            .and_then(|document| document.get_element_by_id("app"))
            .expect("missing #app mount point"),
    )
    .render();
}
