//! Turns a parsed [`Clause`] into a [`CornerSpacingRule`].
//!
//! [`RuleBuilder`] has one mutation per terminal production of the grammar.
//! Numeric mutations take the literal as written and store it converted to
//! database units. Flags can only be switched on. Nothing is checked until
//! [`RuleBuilder::finish`], which is the only way to obtain a rule.

use crate::ast::{self, Clause, CornerBranch, CornerModeNode, ExceptSameKind};
use crate::distance::{Distance, DistanceConverter};
use crate::error::ClauseError;
use crate::rule::*;

/// In-progress rule, exclusively owned by one build.
pub struct RuleBuilder<'a, C: DistanceConverter> {
    converter: &'a C,
    corner_type: Option<CornerType>,
    same_mask: bool,
    corner_mode: Option<CornerMode>,
    eol_width: Option<Distance>,
    jog_length: Option<Distance>,
    edge_length: Option<Distance>,
    include_shape: bool,
    min_length: Option<Distance>,
    except_notch: bool,
    except_notch_length: Option<Distance>,
    except_same_net: bool,
    except_same_metal: bool,
    spacing_table: Vec<SpacingEntry>,
}

impl<'a, C: DistanceConverter> RuleBuilder<'a, C> {
    pub fn new(converter: &'a C) -> Self {
        Self {
            converter,
            corner_type: None,
            same_mask: false,
            corner_mode: None,
            eol_width: None,
            jog_length: None,
            edge_length: None,
            include_shape: false,
            min_length: None,
            except_notch: false,
            except_notch_length: None,
            except_same_net: false,
            except_same_metal: false,
            spacing_table: Vec::new(),
        }
    }

    fn dist(&self, value: f64) -> Distance {
        self.converter.to_distance(value)
    }

    pub fn set_corner_type(&mut self, corner_type: CornerType) {
        self.corner_type = Some(corner_type);
    }

    pub fn set_same_mask(&mut self) {
        self.same_mask = true;
    }

    pub fn set_within(&mut self, value: f64) {
        self.corner_mode = Some(CornerMode::CornerOnly {
            within: self.dist(value),
        });
    }

    pub fn set_corner_to_corner(&mut self) {
        self.corner_mode = Some(CornerMode::CornerToCorner);
    }

    pub fn set_eol_width(&mut self, value: f64) {
        self.eol_width = Some(self.dist(value));
    }

    pub fn set_jog_length(&mut self, value: f64) {
        self.jog_length = Some(self.dist(value));
    }

    pub fn set_edge_length(&mut self, value: f64) {
        self.edge_length = Some(self.dist(value));
    }

    pub fn set_include_shape(&mut self) {
        self.include_shape = true;
    }

    pub fn set_min_length(&mut self, value: f64) {
        self.min_length = Some(self.dist(value));
    }

    pub fn set_except_notch(&mut self) {
        self.except_notch = true;
    }

    pub fn set_except_notch_length(&mut self, value: f64) {
        self.except_notch_length = Some(self.dist(value));
    }

    pub fn set_except_same_net(&mut self) {
        self.except_same_net = true;
    }

    pub fn set_except_same_metal(&mut self) {
        self.except_same_metal = true;
    }

    /// Append a row. A missing `spacing2` takes the converted `spacing1`.
    pub fn add_spacing(&mut self, width: f64, spacing1: f64, spacing2: Option<f64>) {
        let width = self.dist(width);
        let spacing1 = self.dist(spacing1);
        let spacing2 = spacing2.map_or(spacing1, |s| self.dist(s));
        self.spacing_table.push(SpacingEntry {
            width,
            spacing1,
            spacing2,
        });
    }

    /// Validate and produce the rule.
    pub fn finish(self) -> Result<CornerSpacingRule, ClauseError> {
        let corner_type = self.corner_type.ok_or(ClauseError::MissingCornerType)?;

        let outside = |field| ClauseError::FieldOutsideBranch { field, corner_type };
        match corner_type {
            CornerType::Convex => {
                if self.min_length.is_some() {
                    return Err(outside("MINLENGTH"));
                }
                if self.except_notch || self.except_notch_length.is_some() {
                    return Err(outside("EXCEPTNOTCH"));
                }
            }
            CornerType::Concave => {
                if self.same_mask {
                    return Err(outside("SAMEMASK"));
                }
                match self.corner_mode {
                    Some(CornerMode::CornerOnly { .. }) => return Err(outside("CORNERONLY")),
                    Some(CornerMode::CornerToCorner) => return Err(outside("CORNERTOCORNER")),
                    None => {}
                }
                if self.eol_width.is_some() {
                    return Err(outside("EXCEPTEOL"));
                }
            }
        }

        let without = |field, parent| ClauseError::FieldWithoutParent { field, parent };
        if self.jog_length.is_some() && self.eol_width.is_none() {
            return Err(without("EXCEPTJOGLENGTH", "EXCEPTEOL"));
        }
        if self.edge_length.is_some() && self.jog_length.is_none() {
            return Err(without("EDGELENGTH", "EXCEPTJOGLENGTH"));
        }
        if self.include_shape && self.jog_length.is_none() {
            return Err(without("INCLUDELSHAPE", "EXCEPTJOGLENGTH"));
        }
        if self.except_notch && self.min_length.is_none() {
            return Err(without("EXCEPTNOTCH", "MINLENGTH"));
        }
        if self.except_notch_length.is_some() && !self.except_notch {
            return Err(without("notch length", "EXCEPTNOTCH"));
        }

        let except_same = match (self.except_same_net, self.except_same_metal) {
            (true, true) => return Err(ClauseError::ConflictingExceptSame),
            (true, false) => Some(ExceptSame::Net),
            (false, true) => Some(ExceptSame::Metal),
            (false, false) => None,
        };

        if self.spacing_table.is_empty() {
            return Err(ClauseError::EmptySpacingTable);
        }

        let except_eol = self.eol_width.map(|eol_width| ExceptEol {
            eol_width,
            except_jog: self.jog_length.map(|jog_length| ExceptJogLength {
                jog_length,
                edge_length: self.edge_length,
            }),
            include_shape: self.include_shape,
        });
        let min_length = self.min_length.map(|length| MinLength {
            length,
            except_notch: self.except_notch.then_some(ExceptNotch {
                length: self.except_notch_length,
            }),
        });

        Ok(CornerSpacingRule {
            corner_type,
            same_mask: self.same_mask,
            corner_mode: self.corner_mode,
            except_eol,
            min_length,
            except_same,
            spacing_table: self.spacing_table,
        })
    }
}

/// Apply every production of `clause` to a fresh builder, in grammar order.
pub fn build_rule<C: DistanceConverter>(
    clause: &Clause,
    converter: &C,
) -> Result<CornerSpacingRule, ClauseError> {
    let mut builder = RuleBuilder::new(converter);

    match &clause.corner {
        CornerBranch::Convex(convex) => {
            builder.set_corner_type(CornerType::Convex);
            if convex.same_mask {
                builder.set_same_mask();
            }
            match convex.mode {
                Some(CornerModeNode::CornerOnly { within }) => builder.set_within(within),
                Some(CornerModeNode::CornerToCorner) => builder.set_corner_to_corner(),
                None => {}
            }
            if let Some(eol) = &convex.except_eol {
                builder.set_eol_width(eol.eol_width);
                if let Some(jog) = &eol.except_jog {
                    builder.set_jog_length(jog.jog_length);
                    if let Some(edge_length) = jog.edge_length {
                        builder.set_edge_length(edge_length);
                    }
                    if jog.include_shape {
                        builder.set_include_shape();
                    }
                }
            }
        }
        CornerBranch::Concave(ast::ConcaveBranch { min_length }) => {
            builder.set_corner_type(CornerType::Concave);
            if let Some(min_length) = min_length {
                builder.set_min_length(min_length.length);
                if let Some(notch_length) = min_length.except_notch {
                    builder.set_except_notch();
                    if let Some(length) = notch_length {
                        builder.set_except_notch_length(length);
                    }
                }
            }
        }
    }

    match clause.except_same {
        Some(ExceptSameKind::Net) => builder.set_except_same_net(),
        Some(ExceptSameKind::Metal) => builder.set_except_same_metal(),
        None => {}
    }

    for entry in &clause.entries {
        builder.add_spacing(entry.width, entry.spacing1, entry.spacing2);
    }

    builder.finish()
}
