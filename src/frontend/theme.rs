//! Light/dark theme preference, stored per visitor.

use web_sys::{window, Storage};
use yew::prelude::*;

use crate::frontend::cursor::use_interactive_hover;

const THEME_KEY: &str = "folio-theme";

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    fn from_str(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn toggle_label(self) -> String {
        format!("Switch to {} theme", self.toggled().as_str())
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Light => "◐",
            Self::Dark => "◑",
        }
    }
}

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok().flatten()
}

fn read_stored_theme() -> Option<Theme> {
    let value = local_storage()?.get_item(THEME_KEY).ok().flatten()?;
    Theme::from_str(&value)
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|win| win.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

fn resolve_theme() -> Theme {
    read_stored_theme().unwrap_or_else(|| {
        if system_prefers_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    })
}

fn apply_theme(theme: Theme) {
    if let Some(root) = window()
        .and_then(|win| win.document())
        .and_then(|document| document.document_element())
    {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
}

fn persist_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(THEME_KEY, theme.as_str());
    }
}

#[function_component(ThemeToggle)]
pub fn theme_toggle() -> Html {
    let theme = use_state(resolve_theme);
    let (on_enter, on_leave) = use_interactive_hover();

    {
        let current = *theme;
        use_effect_with((), move |_| {
            apply_theme(current);
            || ()
        });
    }

    let onclick = {
        let theme = theme.clone();
        Callback::from(move |_| {
            let next = theme.toggled();
            persist_theme(next);
            apply_theme(next);
            theme.set(next);
        })
    };

    html! {
        <button
            class="theme-toggle"
            type="button"
            aria-label={theme.toggle_label()}
            aria-pressed={(*theme == Theme::Dark).to_string()}
            onclick={onclick}
            onmouseenter={on_enter}
            onmouseleave={on_leave}
        >
            <span aria-hidden="true">{theme.icon()}</span>
        </button>
    }
}
