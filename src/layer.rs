//! Technology layer: the owner of accepted corner-spacing rules.

use crate::rule::CornerSpacingRule;

/// A routing layer and its corner-spacing rules, in the order they were read.
#[derive(Debug, Clone, Default)]
pub struct TechLayer {
    name: String,
    corner_spacing_rules: Vec<CornerSpacingRule>,
}

impl TechLayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            corner_spacing_rules: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn corner_spacing_rules(&self) -> &[CornerSpacingRule] {
        &self.corner_spacing_rules
    }

    /// Rules are validated on construction, so any rule may be attached.
    pub fn add_corner_spacing_rule(&mut self, rule: CornerSpacingRule) {
        self.corner_spacing_rules.push(rule);
    }
}
