//! Data model types for cutting configurations.

mod configuration;
mod material;
mod part;
mod piece;
mod price;
mod sheet;

pub use configuration::{CustomerInfo, CuttingConfiguration};
pub use material::{EdgeType, MaterialType};
pub use part::{Cutout, CuttingPart, EdgeProcessing, EdgeSide, FrameSpec, PartShape, ShapeKind};
pub use piece::{FrameMember, Piece};
pub use price::PriceCalculation;
pub use sheet::{PlacedPiece, Position, Sheet, Shelf};
