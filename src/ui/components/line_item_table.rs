use dioxus::prelude::*;

use crate::domain::{ItemId, PricingModel};
use crate::ui::theme;
use crate::util::format;

#[derive(Clone, PartialEq)]
pub struct LineItemRow {
    pub id: ItemId,
    pub price_usd: f64,
    pub quantity: f64,
    pub price_eur: f64,
    pub line_total_eur: f64,
}

impl LineItemRow {
    /// Snapshot of every item priced under the model's current rate and VAT flag.
    pub fn from_model(model: &PricingModel) -> Vec<Self> {
        model
            .items()
            .iter()
            .map(|item| LineItemRow {
                id: item.id,
                price_usd: item.price_usd,
                quantity: item.quantity,
                price_eur: model.converted_price(item),
                line_total_eur: model.line_total(item),
            })
            .collect()
    }
}

#[component]
pub fn LineItemTable(rows: Vec<LineItemRow>, on_remove: EventHandler<ItemId>) -> Element {
    if rows.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div {
            class: "{theme::TABLE_CONTAINER}",
            table {
                class: "{theme::TABLE}",
                thead {
                    tr {
                        th { "Price USD" }
                        th { "Quantity" }
                        th { "Price EUR" }
                        th { "EUR × Quantity" }
                        th { "Actions" }
                    }
                }
                tbody {
                    for row in rows {
                        LineItemRowView { row, on_remove: on_remove.clone() }
                    }
                }
            }
        }
    }
}

#[component]
fn LineItemRowView(row: LineItemRow, on_remove: EventHandler<ItemId>) -> Element {
    let remove_id = row.id;
    rsx! {
        tr {
            td { {format::money(row.price_usd)} }
            td { {format::quantity(row.quantity)} }
            td { {format::money(row.price_eur)} }
            td { {format::money(row.line_total_eur)} }
            td {
                button {
                    class: "{theme::BTN_DELETE}",
                    onclick: move |_| on_remove.call(remove_id),
                    "Delete"
                }
            }
        }
    }
}
