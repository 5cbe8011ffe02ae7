//! The corner-spacing rule record attached to a technology layer.
//!
//! All distances are in database units. A rule can only be obtained from
//! [`RuleBuilder::finish`](crate::builder::RuleBuilder::finish), so every
//! instance has a corner type, a non-empty spacing table, and only the
//! modifiers that are legal for its corner type.

use std::fmt;

use crate::distance::Distance;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CornerType {
    Convex,
    Concave,
}

impl fmt::Display for CornerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CornerType::Convex => write!(f, "CONVEXCORNER"),
            CornerType::Concave => write!(f, "CONCAVECORNER"),
        }
    }
}

/// Convex-only corner selection. At most one of the two may be given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CornerMode {
    CornerOnly { within: Distance },
    CornerToCorner,
}

/// `EXCEPTEOL eolWidth [EXCEPTJOGLENGTH ...]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptEol {
    pub eol_width: Distance,
    pub except_jog: Option<ExceptJogLength>,
    pub include_shape: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptJogLength {
    pub jog_length: Distance,
    pub edge_length: Option<Distance>,
}

/// Concave-only `MINLENGTH length [EXCEPTNOTCH [notchLength]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinLength {
    pub length: Distance,
    pub except_notch: Option<ExceptNotch>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExceptNotch {
    pub length: Option<Distance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptSame {
    Net,
    Metal,
}

/// One `WIDTH width SPACING spacing1 spacing2` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingEntry {
    pub width: Distance,
    pub spacing1: Distance,
    pub spacing2: Distance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CornerSpacingRule {
    pub(crate) corner_type: CornerType,
    pub(crate) same_mask: bool,
    pub(crate) corner_mode: Option<CornerMode>,
    pub(crate) except_eol: Option<ExceptEol>,
    pub(crate) min_length: Option<MinLength>,
    pub(crate) except_same: Option<ExceptSame>,
    pub(crate) spacing_table: Vec<SpacingEntry>,
}

impl CornerSpacingRule {
    pub fn corner_type(&self) -> CornerType {
        self.corner_type
    }

    pub fn is_same_mask(&self) -> bool {
        self.same_mask
    }

    pub fn corner_mode(&self) -> Option<CornerMode> {
        self.corner_mode
    }

    pub fn is_corner_only(&self) -> bool {
        matches!(self.corner_mode, Some(CornerMode::CornerOnly { .. }))
    }

    /// The `CORNERONLY` distance.
    pub fn within(&self) -> Option<Distance> {
        match self.corner_mode {
            Some(CornerMode::CornerOnly { within }) => Some(within),
            _ => None,
        }
    }

    pub fn is_corner_to_corner(&self) -> bool {
        matches!(self.corner_mode, Some(CornerMode::CornerToCorner))
    }

    pub fn except_eol(&self) -> Option<&ExceptEol> {
        self.except_eol.as_ref()
    }

    pub fn is_except_eol(&self) -> bool {
        self.except_eol.is_some()
    }

    pub fn eol_width(&self) -> Option<Distance> {
        self.except_eol.map(|e| e.eol_width)
    }

    pub fn jog_length(&self) -> Option<Distance> {
        self.except_jog().map(|j| j.jog_length)
    }

    pub fn edge_length(&self) -> Option<Distance> {
        self.except_jog().and_then(|j| j.edge_length)
    }

    pub fn is_include_shape(&self) -> bool {
        self.except_eol.is_some_and(|e| e.include_shape)
    }

    fn except_jog(&self) -> Option<&ExceptJogLength> {
        self.except_eol.as_ref().and_then(|e| e.except_jog.as_ref())
    }

    pub fn min_length(&self) -> Option<&MinLength> {
        self.min_length.as_ref()
    }

    pub fn is_except_notch(&self) -> bool {
        self.min_length.is_some_and(|m| m.except_notch.is_some())
    }

    pub fn except_notch_length(&self) -> Option<Distance> {
        self.min_length
            .and_then(|m| m.except_notch)
            .and_then(|n| n.length)
    }

    pub fn except_same(&self) -> Option<ExceptSame> {
        self.except_same
    }

    pub fn is_except_same_net(&self) -> bool {
        self.except_same == Some(ExceptSame::Net)
    }

    pub fn is_except_same_metal(&self) -> bool {
        self.except_same == Some(ExceptSame::Metal)
    }

    /// Rows in the order they were written. Never empty.
    pub fn spacing_table(&self) -> &[SpacingEntry] {
        &self.spacing_table
    }
}
