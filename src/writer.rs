//! Writes a rule back out as clause text.

use itertools::Itertools;

use crate::distance::{DbuScale, Distance};
use crate::lexer::Keyword;
use crate::rule::{CornerMode, CornerSpacingRule, CornerType, ExceptSame};

impl CornerSpacingRule {
    /// Canonical clause text: keywords in grammar order, single spaces, both
    /// spacing values always present, terminated by ` ;`.
    pub fn to_lef(&self, scale: &DbuScale) -> String {
        let mut words = Words {
            scale,
            words: vec![Keyword::CornerSpacing.to_string()],
        };

        match self.corner_type {
            CornerType::Convex => {
                words.keyword(Keyword::ConvexCorner);
                if self.same_mask {
                    words.keyword(Keyword::SameMask);
                }
                match self.corner_mode {
                    Some(CornerMode::CornerOnly { within }) => {
                        words.keyword(Keyword::CornerOnly);
                        words.distance(within);
                    }
                    Some(CornerMode::CornerToCorner) => words.keyword(Keyword::CornerToCorner),
                    None => {}
                }
                if let Some(eol) = &self.except_eol {
                    words.keyword(Keyword::ExceptEol);
                    words.distance(eol.eol_width);
                    if let Some(jog) = &eol.except_jog {
                        words.keyword(Keyword::ExceptJogLength);
                        words.distance(jog.jog_length);
                        if let Some(edge_length) = jog.edge_length {
                            words.keyword(Keyword::EdgeLength);
                            words.distance(edge_length);
                        }
                        if eol.include_shape {
                            words.keyword(Keyword::IncludeLShape);
                        }
                    }
                }
            }
            CornerType::Concave => {
                words.keyword(Keyword::ConcaveCorner);
                if let Some(min_length) = &self.min_length {
                    words.keyword(Keyword::MinLength);
                    words.distance(min_length.length);
                    if let Some(notch) = &min_length.except_notch {
                        words.keyword(Keyword::ExceptNotch);
                        if let Some(length) = notch.length {
                            words.distance(length);
                        }
                    }
                }
            }
        }

        match self.except_same {
            Some(ExceptSame::Net) => words.keyword(Keyword::ExceptSameNet),
            Some(ExceptSame::Metal) => words.keyword(Keyword::ExceptSameMetal),
            None => {}
        }

        for entry in &self.spacing_table {
            words.keyword(Keyword::Width);
            words.distance(entry.width);
            words.keyword(Keyword::Spacing);
            words.distance(entry.spacing1);
            words.distance(entry.spacing2);
        }

        words.words.push(";".to_string());
        words.words.iter().join(" ")
    }
}

struct Words<'a> {
    scale: &'a DbuScale,
    words: Vec<String>,
}

impl Words<'_> {
    fn keyword(&mut self, kw: Keyword) {
        self.words.push(kw.to_string());
    }

    fn distance(&mut self, distance: Distance) {
        self.words.push(self.scale.to_microns(distance).to_string());
    }
}
