use dioxus::prelude::*;
use tracing::debug;

use crate::{
    domain::{parse_amount, ItemId, PricingModel},
    ui::{
        components::{
            kpi_card::KpiCard,
            line_item_table::{LineItemRow, LineItemTable},
            toast::{push_toast, ToastKind, ToastMessage},
        },
        theme,
    },
    util::format,
};

#[component]
pub fn CalculatorPage() -> Element {
    let model = use_context::<Signal<PricingModel>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();

    let reference = model.peek().reference();
    let mut eur_input = use_signal(|| reference.eur.map(|v| v.to_string()).unwrap_or_default());
    let mut usd_input = use_signal(|| reference.usd.map(|v| v.to_string()).unwrap_or_default());
    let mut new_price_input = use_signal(String::new);
    let mut new_quantity_input = use_signal(String::new);

    let (rate, vat_enabled, rows, total) = model.with(|m| {
        (
            m.exchange_rate(),
            m.vat_enabled(),
            LineItemRow::from_model(m),
            m.total(),
        )
    });

    let on_calculate = move |_: MouseEvent| {
        let eur = parse_amount("EUR price", &eur_input());
        let usd = parse_amount("USD price", &usd_input());
        let (eur, usd) = match (eur, usd) {
            (Ok(eur), Ok(usd)) => (eur, usd),
            (Err(err), _) | (_, Err(err)) => {
                push_toast(toasts, ToastKind::Error, err.to_string());
                return;
            }
        };

        match apply_reference_prices(model, eur, usd) {
            Ok(rate) => push_toast(
                toasts,
                ToastKind::Success,
                format!("Exchange rate set to {}.", format::rate(rate)),
            ),
            Err(message) => push_toast(toasts, ToastKind::Warning, message),
        }
    };

    let on_toggle_vat = move |evt: FormEvent| {
        let mut model = model;
        let enabled = evt.checked();
        model.with_mut(|m| m.set_vat_enabled(enabled));
    };

    let on_add = move |evt: FormEvent| {
        evt.prevent_default();
        let price = parse_amount("USD price", &new_price_input());
        let quantity = parse_amount("Quantity", &new_quantity_input());
        let (price, quantity) = match (price, quantity) {
            (Ok(price), Ok(quantity)) => (price, quantity),
            (Err(err), _) | (_, Err(err)) => {
                push_toast(toasts, ToastKind::Error, err.to_string());
                return;
            }
        };

        let mut model = model;
        match model.with_mut(|m| m.add_item(price, quantity)) {
            Ok(_) => {
                new_price_input.set(String::new());
                new_quantity_input.set(String::new());
                push_toast(toasts, ToastKind::Success, "Item added.");
            }
            Err(err) => push_toast(toasts, ToastKind::Warning, err.to_string()),
        }
    };

    let on_remove = move |id: ItemId| {
        let mut model = model;
        if model.with_mut(|m| m.remove_item(id)).is_some() {
            push_toast(toasts, ToastKind::Info, "Item removed.");
        } else {
            debug!(%id, "remove ignored; item already gone");
        }
    };

    let rate_display = rate.map(format::rate).unwrap_or_else(|| "n/a".to_string());
    let total_display = format!("{} EUR", format::money(total));

    rsx! {
        div { class: "calculator",
            section {
                class: "{theme::PANEL}",
                h2 { "Exchange rate" }
                div {
                    class: "{theme::FORM_ROW}",
                    div { class: "{theme::FIELD}",
                        label { class: "{theme::LABEL}", "Price in EUR" }
                        input {
                            class: "{theme::INPUT}",
                            inputmode: "decimal",
                            placeholder: "Enter the EUR price",
                            value: eur_input(),
                            oninput: move |evt| eur_input.set(evt.value()),
                        }
                    }
                    div { class: "{theme::FIELD}",
                        label { class: "{theme::LABEL}", "Price in USD" }
                        input {
                            class: "{theme::INPUT}",
                            inputmode: "decimal",
                            placeholder: "Enter the USD price",
                            value: usd_input(),
                            oninput: move |evt| usd_input.set(evt.value()),
                        }
                    }
                    button {
                        class: "{theme::BTN_PRIMARY}",
                        onclick: on_calculate,
                        "Calculate rate"
                    }
                }
            }

            section {
                class: "{theme::KPI_GRID}",
                KpiCard {
                    title: "Exchange rate".to_string(),
                    value: rate_display,
                    description: Some("EUR per USD".to_string()),
                }
                KpiCard {
                    title: "Total".to_string(),
                    value: total_display.clone(),
                    description: Some(if vat_enabled { "VAT included" } else { "Without VAT" }.to_string()),
                }
            }

            div { class: "{theme::CHECKBOX_ROW}",
                input {
                    r#type: "checkbox",
                    id: "include-vat",
                    checked: vat_enabled,
                    onchange: on_toggle_vat,
                }
                label { r#for: "include-vat", "Include VAT (10%)" }
            }

            section {
                class: "{theme::PANEL}",
                h2 { "Add item" }
                form {
                    class: "{theme::FORM_ROW}",
                    onsubmit: on_add,
                    div { class: "{theme::FIELD}",
                        label { class: "{theme::LABEL}", "Price in USD" }
                        input {
                            class: "{theme::INPUT}",
                            inputmode: "decimal",
                            placeholder: "Enter the USD price",
                            value: new_price_input(),
                            oninput: move |evt| new_price_input.set(evt.value()),
                        }
                    }
                    div { class: "{theme::FIELD}",
                        label { class: "{theme::LABEL}", "Quantity" }
                        input {
                            class: "{theme::INPUT}",
                            inputmode: "decimal",
                            placeholder: "Enter the quantity",
                            value: new_quantity_input(),
                            oninput: move |evt| new_quantity_input.set(evt.value()),
                        }
                    }
                    button {
                        class: "{theme::BTN_SUCCESS}",
                        r#type: "submit",
                        "Add"
                    }
                }
            }

            LineItemTable { rows, on_remove }

            div { class: "total", "Total: {total_display}" }
        }
    }
}

/// Stores both reference prices and re-derives the rate, returning a user-facing message on failure.
fn apply_reference_prices(
    mut model: Signal<PricingModel>,
    eur: Option<f64>,
    usd: Option<f64>,
) -> Result<f64, String> {
    model.with_mut(|m| {
        m.set_reference_eur(eur);
        m.set_reference_usd(usd);
        m.derive_exchange_rate().map_err(|err| err.to_string())
    })
}
