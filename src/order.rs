//! Cart line items for order submission.
//!
//! One line item per part. Properties are display strings shown on the
//! cart and the order; the platform receives them as-is.

use crate::error::Result;
use crate::model::{CuttingConfiguration, CuttingPart};
use crate::units::format_currency;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A cart line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub title: String,
    pub quantity: u32,
    pub properties: BTreeMap<String, String>,
}

fn edges_label(part: &CuttingPart) -> String {
    if part.edge_processing.is_empty() {
        return "none".to_string();
    }
    part.edge_processing
        .assigned()
        .map(|(side, edge)| format!("{}: {}", side, edge.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the line item for one part.
pub fn line_item(part: &CuttingPart) -> LineItem {
    let mut properties = BTreeMap::new();
    properties.insert("Part".to_string(), part.id.clone());
    properties.insert("Dimensions".to_string(), part.dimensions_string());
    properties.insert("Material".to_string(), part.material.label());
    properties.insert("Edges".to_string(), edges_label(part));
    properties.insert("Shape".to_string(), part.shape.kind.to_string());
    properties.insert("Price per piece".to_string(), format_currency(part.price_per_piece));
    properties.insert("Total".to_string(), format_currency(part.total_price));
    if let Some(frame) = part.frame.filter(|f| f.enabled) {
        let bar = frame
            .bar_width
            .map_or_else(|| "default".to_string(), |w| format!("{} mm", w));
        properties.insert("Frame".to_string(), bar);
    }
    if let Some(block) = part.block_id {
        properties.insert("Block".to_string(), block.to_string());
    }

    LineItem {
        title: format!("{} {}", part.material.name, part.dimensions_string()),
        quantity: part.quantity,
        properties,
    }
}

/// Build line items for all parts with a non-zero quantity.
pub fn build_line_items(configuration: &CuttingConfiguration) -> Vec<LineItem> {
    configuration
        .parts
        .iter()
        .filter(|p| p.quantity > 0)
        .map(line_item)
        .collect()
}

/// Serialize the line items as a JSON array.
pub fn line_items_json(configuration: &CuttingConfiguration) -> Result<String> {
    Ok(serde_json::to_string(&build_line_items(configuration))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::model::{EdgeSide, EdgeType, MaterialType};
    use pretty_assertions::assert_eq;

    fn configuration() -> CuttingConfiguration {
        let mut material = MaterialType::new("w980", "White", 10.0);
        material.thickness = 19.0;
        let mut configuration = CuttingConfiguration::new(vec![
            CuttingPart::new("a", 1000.0, 1000.0, 2, material.clone())
                .with_edge(EdgeSide::Top, EdgeType::new("abs", "ABS 2mm", 0.0))
                .with_block(1),
            CuttingPart::new("b", 300.0, 300.0, 0, material),
        ]);
        configuration
            .recalculate(&EngineConfig::default())
            .expect("Should price");
        configuration
    }

    #[test]
    fn test_line_item_properties() {
        let items = build_line_items(&configuration());
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "White 1000 x 1000 mm");
        assert_eq!(item.quantity, 2);
        assert_eq!(item.properties["Material"], "White 19 mm");
        assert_eq!(item.properties["Edges"], "top: ABS 2mm");
        assert_eq!(item.properties["Price per piece"], "11,00 €");
        assert_eq!(item.properties["Total"], "22,00 €");
        assert_eq!(item.properties["Block"], "1");
        assert!(!item.properties.contains_key("Frame"));
    }

    #[test]
    fn test_frame_property() {
        let part = CuttingPart::new("f", 400.0, 400.0, 1, MaterialType::default()).with_frame(Some(40.0));
        assert_eq!(line_item(&part).properties["Frame"], "40 mm");
        assert_eq!(line_item(&part).properties["Edges"], "none");
    }

    #[test]
    fn test_line_items_json() {
        let json = line_items_json(&configuration()).expect("Should serialize");
        let items: Vec<LineItem> = serde_json::from_str(&json).expect("Should parse");
        assert_eq!(items, build_line_items(&configuration()));
    }
}
