//! Contact modal: the form state machine wired to the relay endpoint.

use gloo::timers::callback::Timeout;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement, InputEvent, MouseEvent, SubmitEvent};
use yew::prelude::*;

use crate::frontend::cursor::{use_interactive_hover, CursorResetBus};
use folio::interaction::contact::{ContactForm, GENERIC_SEND_ERROR, SUCCESS_RESET_DELAY_MS};

#[derive(Serialize)]
struct ContactRequestBody<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ContactResponseBody {
    #[serde(default)]
    ok: bool,
    error: Option<String>,
}

async fn send_contact(name: String, email: String, message: String) -> Result<(), String> {
    let request = Request::post("/api/contact")
        .json(&ContactRequestBody {
            name: &name,
            email: &email,
            message: &message,
        })
        .map_err(|_| GENERIC_SEND_ERROR.to_string())?;

    let response = request
        .send()
        .await
        .map_err(|_| GENERIC_SEND_ERROR.to_string())?;
    let payload = response
        .json::<ContactResponseBody>()
        .await
        .unwrap_or_default();

    if response.ok() && payload.ok {
        Ok(())
    } else {
        Err(payload
            .error
            .unwrap_or_else(|| GENERIC_SEND_ERROR.to_string()))
    }
}

#[derive(Properties, PartialEq)]
pub struct ContactModalProps {
    pub open: bool,
    pub on_close: Callback<()>,
}

#[function_component(ContactModal)]
pub fn contact_modal(props: &ContactModalProps) -> Html {
    let form = use_state(ContactForm::default);
    let reset_bus = use_context::<CursorResetBus>().unwrap_or_default();
    let (on_enter, on_leave) = use_interactive_hover();

    // Closing always travels through here so the cursor reset fires no
    // matter why the modal went away.
    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: ()| {
            reset_bus.broadcast();
            on_close.emit(());
        })
    };

    let on_name_input = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            next.name = value;
            form.set(next);
        })
    };

    let on_email_input = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlInputElement>().value();
            let mut next = (*form).clone();
            next.email = value;
            form.set(next);
        })
    };

    let on_message_input = {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event.target_unchecked_into::<HtmlTextAreaElement>().value();
            let mut next = (*form).clone();
            next.message = value;
            form.set(next);
        })
    };

    let onsubmit = {
        let form = form.clone();
        let close = close.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();

            let mut next = (*form).clone();
            if let Err(field_error) = next.validate() {
                next.error = Some(field_error.message.to_string());
                form.set(next);
                return;
            }
            if !next.begin_submit() {
                return;
            }
            form.set(next.clone());

            let form = form.clone();
            let close = close.clone();
            spawn_local(async move {
                let outcome =
                    send_contact(next.name.clone(), next.email.clone(), next.message.clone()).await;

                let mut settled = next;
                settled.complete(outcome);
                let succeeded = settled.succeeded;
                form.set(settled);

                if succeeded {
                    let form = form.clone();
                    let close = close.clone();
                    Timeout::new(SUCCESS_RESET_DELAY_MS, move || {
                        form.set(ContactForm::default());
                        close.emit(());
                    })
                    .forget();
                }
            });
        })
    };

    let on_close_click = {
        let close = close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };

    let status_line = if form.succeeded {
        html! { <p class="form-status is-success" role="status">{"Message sent. Thank you!"}</p> }
    } else if let Some(error) = form.error.as_deref() {
        html! { <p class="form-status is-error" role="alert">{error}</p> }
    } else {
        Html::default()
    };

    let submit_label = if form.submitting {
        "Sending…"
    } else {
        "Send message"
    };

    html! {
        <div class={classes!("contact-overlay", props.open.then_some("is-open"))} aria-hidden={(!props.open).to_string()}>
            <div class="contact-dialog" role="dialog" aria-modal="true" aria-labelledby="contact-heading">
                <header class="contact-dialog-header">
                    <h2 id="contact-heading">{"Get in touch"}</h2>
                    <button
                        type="button"
                        class="contact-close"
                        aria-label="Close contact form"
                        onclick={on_close_click}
                        onmouseenter={on_enter.clone()}
                        onmouseleave={on_leave.clone()}
                    >{"×"}</button>
                </header>
                <form onsubmit={onsubmit}>
                    <label>
                        {"Name"}
                        <input
                            type="text"
                            name="name"
                            value={form.name.clone()}
                            oninput={on_name_input}
                            disabled={form.submitting}
                        />
                    </label>
                    <label>
                        {"Email"}
                        <input
                            type="text"
                            name="email"
                            value={form.email.clone()}
                            oninput={on_email_input}
                            disabled={form.submitting}
                        />
                    </label>
                    <label>
                        {"Message"}
                        <textarea
                            name="message"
                            rows="5"
                            value={form.message.clone()}
                            oninput={on_message_input}
                            disabled={form.submitting}
                        ></textarea>
                    </label>
                    { status_line }
                    <button
                        type="submit"
                        class="contact-submit"
                        disabled={form.submitting}
                        onmouseenter={on_enter}
                        onmouseleave={on_leave}
                    >{submit_label}</button>
                </form>
            </div>
        </div>
    }
}
