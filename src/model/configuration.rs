//! CuttingConfiguration - the customer's complete order request.

use super::{CuttingPart, PriceCalculation};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::pricing;
use serde::{Deserialize, Serialize};

/// Contact details entered in the configurator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

impl CustomerInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }
}

/// Parts plus totals plus customer info, as submitted by the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CuttingConfiguration {
    pub parts: Vec<CuttingPart>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceCalculation>,
    pub total_price: f64,
    pub customer: CustomerInfo,
}

impl CuttingConfiguration {
    /// Create a configuration from parts.
    pub fn new(parts: Vec<CuttingPart>) -> Self {
        Self {
            parts,
            ..Default::default()
        }
    }

    /// Refresh per-part prices and totals from the current parts.
    pub fn recalculate(&mut self, config: &EngineConfig) -> Result<()> {
        let price = pricing::calculate_price_with(&self.parts, config)?;
        pricing::apply_part_prices(&mut self.parts, config)?;
        self.total_price = price.total_cost;
        self.price = Some(price);
        Ok(())
    }

    /// Total number of copies over all parts.
    pub fn total_quantity(&self) -> u32 {
        self.parts.iter().map(|p| p.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MaterialType;

    #[test]
    fn test_recalculate_fills_totals() {
        let material = MaterialType::new("m", "Birch", 10.0);
        let mut configuration = CuttingConfiguration::new(vec![
            CuttingPart::new("a", 1000.0, 1000.0, 2, material.clone()),
            CuttingPart::new("b", 500.0, 1000.0, 1, material),
        ]);
        configuration
            .recalculate(&EngineConfig::default())
            .expect("Should price");

        let price = configuration.price.expect("Price should be set");
        assert!((configuration.total_price - 27.5).abs() < 1e-9);
        assert_eq!(price.total_cost, configuration.total_price);
        assert!((configuration.parts[0].price_per_piece - 11.0).abs() < 1e-9);
        assert!((configuration.parts[0].total_price - 22.0).abs() < 1e-9);
        assert_eq!(configuration.total_quantity(), 3);
    }

    #[test]
    fn test_customer_is_empty() {
        let mut customer = CustomerInfo::default();
        assert!(customer.is_empty());
        customer.email = "a@example.com".to_string();
        assert!(!customer.is_empty());
    }
}
