use dioxus::prelude::*;

use crate::util::version::version_label;

#[component]
pub fn Shell(title: String, children: Element) -> Element {
    let version = version_label();

    rsx! {
        div {
            header {
                class: "shell-header",
                h1 { class: "shell-title", "{title}" }
                span { class: "shell-version", "{version}" }
            }
            main {
                {children}
            }
        }
    }
}
