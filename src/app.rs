use dioxus::prelude::*;

use crate::{
    domain::PricingModel,
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::CalculatorPage,
        shell::Shell,
    },
    util::{assets, config::AppConfig},
};

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();

    // Session state only; nothing survives a restart.
    let model = use_signal(|| PricingModel::new(config.vat_enabled_by_default));
    use_context_provider(|| model);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Shell {
            title: config.window_title.clone(),
            CalculatorPage {}
        }
        Toast {}
    }
}
