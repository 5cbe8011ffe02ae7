//! Entry points for reading one `CORNERSPACING` clause.
//!
//! The text is lexed, parsed into a tree and built into a rule before anything
//! touches the layer, so a rejected clause leaves no trace.

use tracing::debug;

use crate::builder::build_rule;
use crate::distance::DistanceConverter;
use crate::error::ClauseError;
use crate::layer::TechLayer;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::rule::CornerSpacingRule;

/// Read one clause (terminator included) into a rule, with a diagnostic on
/// failure. Whitespace may follow the `;`; nothing else may.
pub fn parse_clause<C: DistanceConverter>(
    text: &str,
    converter: &C,
) -> Result<CornerSpacingRule, ClauseError> {
    let tokens = tokenize(text)?;
    let clause = parse(&tokens)?;
    build_rule(&clause, converter)
}

/// Read one clause and append the rule to `layer`.
///
/// Returns `true` iff a rule was appended. On `false` the layer is unchanged.
pub fn parse_corner_spacing<C: DistanceConverter>(
    text: &str,
    layer: &mut TechLayer,
    converter: &C,
) -> bool {
    match parse_clause(text, converter) {
        Ok(rule) => {
            debug!(
                layer = layer.name(),
                corner_type = %rule.corner_type(),
                entries = rule.spacing_table().len(),
                "corner spacing rule accepted"
            );
            layer.add_corner_spacing_rule(rule);
            true
        }
        Err(err) => {
            debug!(layer = layer.name(), %err, "corner spacing rule rejected");
            false
        }
    }
}
