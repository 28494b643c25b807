use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

/// Fixed VAT markup applied to every EUR conversion when enabled.
pub const VAT_MULTIPLIER: f64 = 1.10;

/// Opaque identifier for a line item. Issued by [`PricingModel`] and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item-{}", self.0)
    }
}

/// EUR and USD prices of the same good, used only to derive the exchange rate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ReferencePrices {
    pub eur: Option<f64>,
    pub usd: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub id: ItemId,
    pub price_usd: f64,
    pub quantity: f64,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    #[error("{0} is required")]
    MissingInput(&'static str),
    #[error("calculate the exchange rate before adding items")]
    MissingExchangeRate,
    #[error("cannot derive a usable exchange rate from EUR {eur} / USD {usd}")]
    InvalidRate { eur: f64, usd: f64 },
    #[error("{field} must be a positive number, got {value}")]
    InvalidInput { field: &'static str, value: f64 },
}

/// In-memory calculator state: reference prices, derived rate, VAT toggle and line items.
///
/// EUR prices are never stored on items. They are computed from the current rate
/// and VAT flag on every read, so changing either applies to all existing items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PricingModel {
    reference: ReferencePrices,
    exchange_rate: Option<f64>,
    vat_enabled: bool,
    items: Vec<LineItem>,
    next_id: u64,
}

impl PricingModel {
    pub fn new(vat_enabled: bool) -> Self {
        Self {
            vat_enabled,
            ..Self::default()
        }
    }

    pub fn reference(&self) -> ReferencePrices {
        self.reference
    }

    pub fn set_reference_eur(&mut self, value: Option<f64>) {
        self.reference.eur = value;
    }

    pub fn set_reference_usd(&mut self, value: Option<f64>) {
        self.reference.usd = value;
    }

    pub fn exchange_rate(&self) -> Option<f64> {
        self.exchange_rate
    }

    /// Computes `eur / usd` from the stored reference prices and keeps it as the
    /// current rate. On error the previous rate is left untouched.
    pub fn derive_exchange_rate(&mut self) -> Result<f64, PricingError> {
        let eur = self
            .reference
            .eur
            .ok_or(PricingError::MissingInput("EUR reference price"))?;
        let usd = self
            .reference
            .usd
            .ok_or(PricingError::MissingInput("USD reference price"))?;

        let rate = eur / usd;
        if !rate.is_finite() || rate < 0.0 {
            warn!(eur, usd, "refusing to store unusable exchange rate");
            return Err(PricingError::InvalidRate { eur, usd });
        }

        debug!(eur, usd, rate, "exchange rate derived");
        self.exchange_rate = Some(rate);
        Ok(rate)
    }

    pub fn vat_enabled(&self) -> bool {
        self.vat_enabled
    }

    pub fn set_vat_enabled(&mut self, enabled: bool) {
        debug!(enabled, "vat toggled");
        self.vat_enabled = enabled;
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Appends a line item. Rejected additions leave the item list unchanged.
    pub fn add_item(
        &mut self,
        price_usd: Option<f64>,
        quantity: Option<f64>,
    ) -> Result<ItemId, PricingError> {
        if self.exchange_rate.is_none() {
            warn!("item rejected: no exchange rate");
            return Err(PricingError::MissingExchangeRate);
        }
        let price_usd = price_usd.ok_or(PricingError::MissingInput("USD price"))?;
        let quantity = quantity.ok_or(PricingError::MissingInput("Quantity"))?;
        ensure_positive("USD price", price_usd)?;
        ensure_positive("Quantity", quantity)?;

        self.next_id += 1;
        let id = ItemId(self.next_id);
        self.items.push(LineItem {
            id,
            price_usd,
            quantity,
        });
        debug!(%id, price_usd, quantity, "line item added");
        Ok(id)
    }

    /// Removes the item with `id`. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: ItemId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        debug!(%id, "line item removed");
        Some(removed)
    }

    /// EUR unit price of `item` under the current rate and VAT flag; `0` without a rate.
    pub fn converted_price(&self, item: &LineItem) -> f64 {
        let Some(rate) = self.exchange_rate else {
            return 0.0;
        };
        let eur = item.price_usd * rate;
        if self.vat_enabled {
            eur * VAT_MULTIPLIER
        } else {
            eur
        }
    }

    pub fn line_total(&self, item: &LineItem) -> f64 {
        self.converted_price(item) * item.quantity
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|item| self.line_total(item)).sum()
    }
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::InvalidInput { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
    }

    fn model_with_rate(eur: f64, usd: f64) -> PricingModel {
        let mut model = PricingModel::default();
        model.set_reference_eur(Some(eur));
        model.set_reference_usd(Some(usd));
        model.derive_exchange_rate().unwrap();
        model
    }

    #[test]
    fn walkthrough_matches_expected_totals() {
        let mut model = model_with_rate(110.0, 100.0);
        assert!(approx(model.exchange_rate().unwrap(), 1.10));

        let first = model.add_item(Some(50.0), Some(2.0)).unwrap();
        let item = model.items()[0].clone();
        assert!(approx(model.converted_price(&item), 55.0));
        assert!(approx(model.line_total(&item), 110.0));
        assert!(approx(model.total(), 110.0));

        model.set_vat_enabled(true);
        assert!(approx(model.converted_price(&item), 60.5));
        assert!(approx(model.total(), 121.0));

        model.add_item(Some(10.0), Some(1.0)).unwrap();
        assert!(approx(model.total(), 132.0));

        model.remove_item(first).unwrap();
        assert!(approx(model.total(), 11.0));
    }

    #[test]
    fn derive_requires_both_reference_prices() {
        let mut model = PricingModel::default();
        model.set_reference_eur(Some(10.0));
        assert_eq!(
            model.derive_exchange_rate(),
            Err(PricingError::MissingInput("USD reference price"))
        );
        assert_eq!(model.exchange_rate(), None);
    }

    #[test]
    fn derive_keeps_previous_rate_when_input_unset() {
        let mut model = model_with_rate(90.0, 100.0);
        model.set_reference_usd(None);
        assert!(model.derive_exchange_rate().is_err());
        assert!(approx(model.exchange_rate().unwrap(), 0.9));
    }

    #[test]
    fn derive_rejects_zero_usd() {
        let mut model = model_with_rate(90.0, 100.0);
        model.set_reference_usd(Some(0.0));
        assert!(matches!(
            model.derive_exchange_rate(),
            Err(PricingError::InvalidRate { .. })
        ));
        assert!(approx(model.exchange_rate().unwrap(), 0.9));

        model.set_reference_eur(Some(0.0));
        assert!(model.derive_exchange_rate().is_err());
    }

    #[test]
    fn derive_stores_zero_rate() {
        let mut model = model_with_rate(0.0, 100.0);
        assert_eq!(model.exchange_rate(), Some(0.0));

        model.add_item(Some(25.0), Some(4.0)).unwrap();
        let item = model.items()[0].clone();
        assert_eq!(model.converted_price(&item), 0.0);
        assert_eq!(model.total(), 0.0);
    }

    #[test]
    fn derive_rejects_negative_rate() {
        let mut model = PricingModel::default();
        model.set_reference_eur(Some(-5.0));
        model.set_reference_usd(Some(10.0));
        assert!(model.derive_exchange_rate().is_err());
        assert_eq!(model.exchange_rate(), None);
    }

    #[test]
    fn setting_references_does_not_rederive() {
        let mut model = model_with_rate(110.0, 100.0);
        model.set_reference_eur(Some(200.0));
        assert!(approx(model.exchange_rate().unwrap(), 1.10));
    }

    #[test]
    fn add_without_rate_is_rejected() {
        let mut model = PricingModel::default();
        assert_eq!(
            model.add_item(Some(10.0), Some(1.0)),
            Err(PricingError::MissingExchangeRate)
        );
        assert!(model.items().is_empty());
    }

    #[test]
    fn add_requires_present_positive_inputs() {
        let mut model = model_with_rate(1.0, 1.0);
        assert_eq!(
            model.add_item(None, Some(1.0)),
            Err(PricingError::MissingInput("USD price"))
        );
        assert_eq!(
            model.add_item(Some(1.0), None),
            Err(PricingError::MissingInput("Quantity"))
        );
        assert!(matches!(
            model.add_item(Some(0.0), Some(1.0)),
            Err(PricingError::InvalidInput { field: "USD price", .. })
        ));
        assert!(matches!(
            model.add_item(Some(1.0), Some(f64::NAN)),
            Err(PricingError::InvalidInput { field: "Quantity", .. })
        ));
        assert!(model.items().is_empty());
    }

    #[test]
    fn fractional_quantity_is_accepted() {
        let mut model = model_with_rate(2.0, 1.0);
        model.add_item(Some(3.0), Some(0.5)).unwrap();
        assert!(approx(model.total(), 3.0));
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut model = model_with_rate(1.0, 1.0);
        let a = model.add_item(Some(1.0), Some(1.0)).unwrap();
        model.remove_item(a);
        let b = model.add_item(Some(1.0), Some(1.0)).unwrap();
        let c = model.add_item(Some(1.0), Some(1.0)).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert!(b < c);
    }

    #[test]
    fn items_keep_insertion_order() {
        let mut model = model_with_rate(1.0, 1.0);
        let ids: Vec<_> = (1..=3)
            .map(|n| model.add_item(Some(n as f64), Some(1.0)).unwrap())
            .collect();
        let listed: Vec<_> = model.items().iter().map(|item| item.id).collect();
        assert_eq!(ids, listed);
    }

    #[test]
    fn removing_unknown_id_changes_nothing() {
        let mut model = model_with_rate(1.0, 1.0);
        let id = model.add_item(Some(4.0), Some(2.0)).unwrap();
        model.remove_item(id);
        let before = model.clone();
        assert_eq!(model.remove_item(id), None);
        assert_eq!(model, before);
    }

    #[test]
    fn converted_price_is_zero_without_rate() {
        let model = PricingModel::default();
        let item = LineItem {
            id: ItemId(1),
            price_usd: 10.0,
            quantity: 1.0,
        };
        assert_eq!(model.converted_price(&item), 0.0);
        assert_eq!(model.total(), 0.0);
    }

    #[test]
    fn rederiving_rate_reprices_existing_items() {
        let mut model = model_with_rate(1.0, 1.0);
        model.add_item(Some(10.0), Some(3.0)).unwrap();
        assert!(approx(model.total(), 30.0));
        model.set_reference_eur(Some(2.0));
        model.derive_exchange_rate().unwrap();
        assert!(approx(model.total(), 60.0));
    }

    #[test]
    fn new_honours_vat_default() {
        assert!(PricingModel::new(true).vat_enabled());
        assert!(!PricingModel::new(false).vat_enabled());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn price() -> impl Strategy<Value = f64> {
            0.01f64..100_000.0
        }

        proptest! {
            /// Converting the USD reference price yields the EUR reference price.
            #[test]
            fn rate_round_trips_reference(eur in price(), usd in price()) {
                let mut model = model_with_rate(eur, usd);
                prop_assert!(approx(model.exchange_rate().unwrap(), eur / usd));
                model.add_item(Some(usd), Some(1.0)).unwrap();
                let item = model.items()[0].clone();
                prop_assert!(approx(model.converted_price(&item), eur));
            }

            #[test]
            fn derive_is_idempotent(eur in price(), usd in price()) {
                let mut model = model_with_rate(eur, usd);
                let first = model.exchange_rate();
                model.derive_exchange_rate().unwrap();
                prop_assert_eq!(first, model.exchange_rate());
            }

            /// VAT scales every converted price and the total by the fixed multiplier.
            #[test]
            fn vat_scales_everything(
                eur in price(),
                usd in price(),
                items in prop::collection::vec((price(), 0.1f64..1_000.0), 0..12),
            ) {
                let mut model = model_with_rate(eur, usd);
                for (p, q) in &items {
                    model.add_item(Some(*p), Some(*q)).unwrap();
                }
                let plain: Vec<f64> = model.items().iter().map(|i| model.converted_price(i)).collect();
                let plain_total = model.total();

                model.set_vat_enabled(true);
                for (item, base) in model.items().iter().zip(&plain) {
                    prop_assert!(approx(model.converted_price(item), base * VAT_MULTIPLIER));
                }
                prop_assert!(approx(model.total(), plain_total * VAT_MULTIPLIER));
            }

            #[test]
            fn total_is_sum_of_line_totals(
                items in prop::collection::vec((price(), 0.1f64..1_000.0), 0..12),
                vat in any::<bool>(),
            ) {
                let mut model = model_with_rate(92.0, 100.0);
                model.set_vat_enabled(vat);
                for (p, q) in &items {
                    model.add_item(Some(*p), Some(*q)).unwrap();
                }
                let expected: f64 = model
                    .items()
                    .iter()
                    .map(|i| model.converted_price(i) * i.quantity)
                    .sum();
                prop_assert!(approx(model.total(), expected));
                prop_assert_eq!(model.items().len(), items.len());
            }

            /// Removing an item subtracts exactly its prior contribution.
            #[test]
            fn remove_subtracts_contribution(
                items in prop::collection::vec((price(), 0.1f64..1_000.0), 1..12),
                pick in any::<prop::sample::Index>(),
            ) {
                let mut model = model_with_rate(92.0, 100.0);
                for (p, q) in &items {
                    model.add_item(Some(*p), Some(*q)).unwrap();
                }
                let target = model.items()[pick.index(items.len())].clone();
                let contribution = model.line_total(&target);
                let before = model.total();

                model.remove_item(target.id).unwrap();
                prop_assert!((before - contribution - model.total()).abs() <= 1e-6 * before.max(1.0));
                prop_assert_eq!(model.items().len(), items.len() - 1);
            }

            #[test]
            fn add_before_rate_never_grows_list(p in price(), q in 0.1f64..1_000.0) {
                let mut model = PricingModel::default();
                prop_assert!(model.add_item(Some(p), Some(q)).is_err());
                prop_assert!(model.items().is_empty());
            }
        }
    }
}
