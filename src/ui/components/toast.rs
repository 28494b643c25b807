use std::time::Duration;

use dioxus::prelude::*;

use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: ToastKind,
    pub text: String,
}

impl ToastMessage {
    pub fn new(kind: ToastKind, text: impl Into<String>) -> Self {
        Self {
            id: generate_id("toast"),
            kind,
            text: text.into(),
        }
    }
}

/// Appends a toast, dropping the oldest once the stack is full.
pub fn enqueue(entries: &mut Vec<ToastMessage>, message: ToastMessage) {
    if entries.len() >= MAX_TOASTS {
        entries.remove(0);
    }
    entries.push(message);
}

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let message = ToastMessage::new(kind, message);
    toasts.with_mut(|entries| enqueue(entries, message));
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let views = keyed_views(toasts());

    if views.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "toast-stack",
            ul {
                for (key, view) in views {
                    ToastCard { key: "{key}", view, toasts: toasts.clone() }
                }
            }
        }
    }
}

/// Pairs each view with its toast id. Cards must be keyed by id: the
/// auto-dismiss future captures the id on first render and is not restarted
/// when props change, so positional reuse would orphan the next toast's timer.
fn keyed_views(messages: Vec<ToastMessage>) -> Vec<(String, ToastView)> {
    messages
        .into_iter()
        .map(|message| (message.id.clone(), ToastView::from(message)))
        .collect()
}

#[component]
fn ToastCard(view: ToastView, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toasts_for_timer = toasts.clone();
    let toast_id = view.id.clone();
    let _auto_dismiss = use_future(move || {
        let mut toasts = toasts_for_timer.clone();
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let class = format!("toast {}", view.theme);
    rsx! {
        li {
            class: class,
            span { "{view.icon}" }
            p { "{view.text}" }
            button {
                onclick: move |_| {
                    let target = view.id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}

#[derive(Clone, PartialEq)]
struct ToastView {
    id: String,
    text: String,
    theme: &'static str,
    icon: &'static str,
}

impl From<ToastMessage> for ToastView {
    fn from(message: ToastMessage) -> Self {
        let (theme, icon) = match message.kind {
            ToastKind::Info => ("toast-info", "ℹ️"),
            ToastKind::Success => ("toast-success", "✅"),
            ToastKind::Warning => ("toast-warning", "⚠️"),
            ToastKind::Error => ("toast-error", "⛔"),
        };

        ToastView {
            id: message.id,
            text: message.text,
            theme,
            icon,
        }
    }
}
