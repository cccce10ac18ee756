pub mod document;
pub mod risk;

pub use document::{Block, Document, DocumentError, Line};
pub use risk::{Evidence, Risk, RiskReport, NOT_AVAILABLE};
