//! Parse tree for a `CORNERSPACING` clause.
//!
//! Numbers are kept exactly as written (in microns); conversion to database
//! units happens when the tree is turned into a rule.

/// A fully recognized clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub corner: CornerBranch,
    pub except_same: Option<ExceptSameKind>,
    /// Never empty once the parser has accepted the clause.
    pub entries: Vec<SpacingEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CornerBranch {
    Convex(ConvexBranch),
    Concave(ConcaveBranch),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvexBranch {
    pub same_mask: bool,
    pub mode: Option<CornerModeNode>,
    pub except_eol: Option<ExceptEolNode>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CornerModeNode {
    CornerOnly { within: f64 },
    CornerToCorner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptEolNode {
    pub eol_width: f64,
    pub except_jog: Option<ExceptJogNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExceptJogNode {
    pub jog_length: f64,
    pub edge_length: Option<f64>,
    pub include_shape: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConcaveBranch {
    pub min_length: Option<MinLengthNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinLengthNode {
    pub length: f64,
    /// `Some(None)` is a bare `EXCEPTNOTCH`.
    pub except_notch: Option<Option<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptSameKind {
    Net,
    Metal,
}

/// `WIDTH w SPACING s1 [s2]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacingEntry {
    pub width: f64,
    pub spacing1: f64,
    pub spacing2: Option<f64>,
}
