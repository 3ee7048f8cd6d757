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

pub fn push_toast(
    mut toasts: Signal<Vec<ToastMessage>>,
    kind: ToastKind,
    message: impl Into<String>,
) {
    let text = message.into();
    toasts.with_mut(|entries| enqueue(entries, ToastMessage::new(kind, text)));
}

/// Appends a toast, dropping the oldest once the queue is full.
fn enqueue(entries: &mut Vec<ToastMessage>, message: ToastMessage) {
    if entries.len() >= MAX_TOASTS {
        entries.remove(0);
    }
    entries.push(message);
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let views = toast_views(&toasts());

    if views.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "toasts",
            ul {
                class: "toasts__list",
                for view in views {
                    ToastCard { key: "{view.id}", view, toasts }
                }
            }
        }
    }
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
            span { class: "toast__icon", "{view.icon}" }
            p { class: "toast__text", "{view.text}" }
            button {
                class: "toast__dismiss",
                onclick: move |_| {
                    let target = view.id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}

/// Render models in queue order. Each card is keyed by its toast id so the
/// auto-dismiss timer stays with its toast when earlier ones are removed.
fn toast_views(entries: &[ToastMessage]) -> Vec<ToastView> {
    entries.iter().cloned().map(ToastView::from).collect()
}

#[derive(Clone, Debug, PartialEq)]
struct ToastView {
    id: String,
    text: String,
    theme: &'static str,
    icon: &'static str,
}

impl From<ToastMessage> for ToastView {
    fn from(message: ToastMessage) -> Self {
        let (theme, icon) = match message.kind {
            ToastKind::Info => ("toast--info", "ℹ️"),
            ToastKind::Success => ("toast--success", "✅"),
            ToastKind::Warning => ("toast--warning", "⚠️"),
            ToastKind::Error => ("toast--error", "⛔"),
        };

        ToastView {
            id: message.id,
            text: message.text,
            theme,
            icon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_keeps_newest_five() {
        let mut entries = Vec::new();
        for i in 0..7 {
            enqueue(&mut entries, ToastMessage::new(ToastKind::Info, format!("toast {i}")));
        }
        let texts: Vec<_> = entries.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["toast 2", "toast 3", "toast 4", "toast 5", "toast 6"]);
    }

    #[test]
    fn card_keys_follow_their_toast_after_eviction() {
        let mut entries = Vec::new();
        for i in 0..MAX_TOASTS {
            enqueue(&mut entries, ToastMessage::new(ToastKind::Info, format!("toast {i}")));
        }
        let before: Vec<(String, String)> = toast_views(&entries)
            .into_iter()
            .map(|view| (view.id, view.text))
            .collect();

        enqueue(&mut entries, ToastMessage::new(ToastKind::Error, "overflow"));
        let after = toast_views(&entries);

        assert_eq!(after.len(), MAX_TOASTS);
        for (view, (id, text)) in after.iter().zip(before.iter().skip(1)) {
            assert_eq!(&view.id, id);
            assert_eq!(&view.text, text);
        }
        let last = after.last().unwrap();
        assert_eq!(last.text, "overflow");
        assert!(before.iter().all(|(id, _)| *id != last.id));
    }

    #[test]
    fn toast_ids_are_unique() {
        let a = ToastMessage::new(ToastKind::Warning, "a");
        let b = ToastMessage::new(ToastKind::Warning, "b");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("toast-"));
    }
}
