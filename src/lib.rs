//! Reader for LEF58 `CORNERSPACING` technology-layer rules.
//!
//! # Example
//!
//! ```rust
//! use cornerspacing::{CornerType, DbuScale, Distance, TechLayer, parse_corner_spacing};
//!
//! let mut layer = TechLayer::new("metal1");
//! let scale = DbuScale::default(); // 1000 database units per micron
//!
//! assert!(parse_corner_spacing(
//!     "CORNERSPACING CONVEXCORNER CORNERTOCORNER WIDTH 0.1 SPACING 0.2 0.3 ;",
//!     &mut layer,
//!     &scale,
//! ));
//!
//! let rule = &layer.corner_spacing_rules()[0];
//! assert_eq!(rule.corner_type(), CornerType::Convex);
//! assert!(rule.is_corner_to_corner());
//! assert_eq!(rule.spacing_table()[0].spacing2, Distance(300));
//!
//! // Rejected clauses leave the layer untouched.
//! assert!(!parse_corner_spacing("CORNERSPACING CONVEXCORNER ;", &mut layer, &scale));
//! assert_eq!(layer.corner_spacing_rules().len(), 1);
//! ```

pub mod ast;
pub mod builder;
mod clause;
mod distance;
mod error;
mod layer;
pub mod lexer;
pub mod parser;
mod rule;
mod writer;

pub use builder::{RuleBuilder, build_rule};
pub use clause::{parse_clause, parse_corner_spacing};
pub use distance::{DEFAULT_DBU_PER_MICRON, DbuScale, Distance, DistanceConverter};
pub use error::ClauseError;
pub use layer::TechLayer;
pub use rule::{
    CornerMode, CornerSpacingRule, CornerType, ExceptEol, ExceptJogLength, ExceptNotch,
    ExceptSame, MinLength, SpacingEntry,
};
