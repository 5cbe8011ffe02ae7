//! Recursive descent parser for `CORNERSPACING` clauses.
//!
//! ```text
//! clause       := CORNERSPACING (convex | concave) except_same? entry+ ';'
//! convex       := CONVEXCORNER SAMEMASK? corner_mode? except_eol?
//! corner_mode  := CORNERONLY number | CORNERTOCORNER
//! except_eol   := EXCEPTEOL number except_jog?
//! except_jog   := EXCEPTJOGLENGTH number (EDGELENGTH number)? INCLUDELSHAPE?
//! concave      := CONCAVECORNER min_length?
//! min_length   := MINLENGTH number (EXCEPTNOTCH number?)?
//! except_same  := EXCEPTSAMENET | EXCEPTSAMEMETAL
//! entry        := WIDTH number SPACING number number?
//! ```
//!
//! Alternatives are tried in the order written and the first match wins.
//! Once a keyword has been consumed the parser is committed to it.

use std::iter::Peekable;
use std::slice::Iter;

use tracing::trace;

use crate::ast::*;
use crate::error::ClauseError;
use crate::lexer::{Keyword, Token, TokenKind};

/// Parse a token stream into a [`Clause`]. Every token must be consumed.
pub fn parse(tokens: &[Token]) -> Result<Clause, ClauseError> {
    let mut parser = Parser {
        tokens: tokens.iter().peekable(),
    };
    let clause = parser.parse_clause()?;
    if let Some(token) = parser.tokens.next() {
        return Err(ClauseError::TrailingInput {
            offset: token.offset,
        });
    }
    Ok(clause)
}

struct Parser<'a> {
    tokens: Peekable<Iter<'a, Token>>,
}

impl Parser<'_> {
    fn parse_clause(&mut self) -> Result<Clause, ClauseError> {
        self.expect(Keyword::CornerSpacing)?;

        let corner = if self.eat(Keyword::ConvexCorner) {
            CornerBranch::Convex(self.parse_convex()?)
        } else if self.eat(Keyword::ConcaveCorner) {
            CornerBranch::Concave(self.parse_concave()?)
        } else {
            return Err(self.error_here("CONVEXCORNER or CONCAVECORNER"));
        };

        let except_same = self.parse_except_same();

        let mut entries = Vec::new();
        while self.eat(Keyword::Width) {
            entries.push(self.parse_spacing_entry()?);
        }
        if entries.is_empty() {
            return Err(self.error_here("WIDTH"));
        }

        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Semicolon,
                ..
            }) => {
                self.tokens.next();
            }
            _ => return Err(self.error_here("WIDTH or ';'")),
        }

        Ok(Clause {
            corner,
            except_same,
            entries,
        })
    }

    /// `CONVEXCORNER` has already been consumed.
    fn parse_convex(&mut self) -> Result<ConvexBranch, ClauseError> {
        let same_mask = self.eat(Keyword::SameMask);

        let mode = if self.eat(Keyword::CornerOnly) {
            let within = self.expect_number("CORNERONLY distance")?;
            Some(CornerModeNode::CornerOnly { within })
        } else if self.eat(Keyword::CornerToCorner) {
            Some(CornerModeNode::CornerToCorner)
        } else {
            None
        };

        let except_eol = if self.eat(Keyword::ExceptEol) {
            Some(self.parse_except_eol()?)
        } else {
            None
        };

        trace!(same_mask, ?mode, "convex corner");
        Ok(ConvexBranch {
            same_mask,
            mode,
            except_eol,
        })
    }

    fn parse_except_eol(&mut self) -> Result<ExceptEolNode, ClauseError> {
        let eol_width = self.expect_number("EXCEPTEOL width")?;
        let except_jog = if self.eat(Keyword::ExceptJogLength) {
            let jog_length = self.expect_number("EXCEPTJOGLENGTH length")?;
            let edge_length = if self.eat(Keyword::EdgeLength) {
                Some(self.expect_number("EDGELENGTH length")?)
            } else {
                None
            };
            let include_shape = self.eat(Keyword::IncludeLShape);
            Some(ExceptJogNode {
                jog_length,
                edge_length,
                include_shape,
            })
        } else {
            None
        };
        Ok(ExceptEolNode {
            eol_width,
            except_jog,
        })
    }

    /// `CONCAVECORNER` has already been consumed.
    fn parse_concave(&mut self) -> Result<ConcaveBranch, ClauseError> {
        if !self.eat(Keyword::MinLength) {
            return Ok(ConcaveBranch::default());
        }
        let length = self.expect_number("MINLENGTH length")?;
        let except_notch = if self.eat(Keyword::ExceptNotch) {
            Some(self.eat_number())
        } else {
            None
        };
        trace!(length, ?except_notch, "concave corner");
        Ok(ConcaveBranch {
            min_length: Some(MinLengthNode {
                length,
                except_notch,
            }),
        })
    }

    fn parse_except_same(&mut self) -> Option<ExceptSameKind> {
        if self.eat(Keyword::ExceptSameNet) {
            Some(ExceptSameKind::Net)
        } else if self.eat(Keyword::ExceptSameMetal) {
            Some(ExceptSameKind::Metal)
        } else {
            None
        }
    }

    /// `WIDTH` has already been consumed.
    fn parse_spacing_entry(&mut self) -> Result<SpacingEntry, ClauseError> {
        let width = self.expect_number("WIDTH value")?;
        self.expect(Keyword::Spacing)?;
        let spacing1 = self.expect_number("SPACING value")?;
        let spacing2 = self.eat_number();
        trace!(width, spacing1, ?spacing2, "spacing entry");
        Ok(SpacingEntry {
            width,
            spacing1,
            spacing2,
        })
    }

    /// Consume `kw` if it is next.
    fn eat(&mut self, kw: Keyword) -> bool {
        self.tokens
            .next_if(|t| t.kind == TokenKind::Keyword(kw))
            .is_some()
    }

    fn expect(&mut self, kw: Keyword) -> Result<(), ClauseError> {
        if self.eat(kw) {
            Ok(())
        } else {
            Err(self.error_here(kw.as_str()))
        }
    }

    fn eat_number(&mut self) -> Option<f64> {
        match self.tokens.peek() {
            Some(Token {
                kind: TokenKind::Number(value),
                ..
            }) => {
                let value = *value;
                self.tokens.next();
                Some(value)
            }
            _ => None,
        }
    }

    fn expect_number(&mut self, expected: &'static str) -> Result<f64, ClauseError> {
        self.eat_number().ok_or_else(|| self.error_here(expected))
    }

    fn error_here(&mut self, expected: &'static str) -> ClauseError {
        match self.tokens.peek() {
            Some(token) => ClauseError::Expected {
                offset: token.offset,
                expected,
                found: token.kind.to_string(),
            },
            None => ClauseError::UnexpectedEnd { expected },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_ok(s: &str) -> Clause {
        parse(&tokenize(s).unwrap()).expect("parse should succeed")
    }

    fn parse_err(s: &str) -> ClauseError {
        parse(&tokenize(s).unwrap()).expect_err("parse should fail")
    }

    fn convex(clause: &Clause) -> &ConvexBranch {
        match &clause.corner {
            CornerBranch::Convex(c) => c,
            _ => panic!("expected Convex"),
        }
    }

    fn concave(clause: &Clause) -> &ConcaveBranch {
        match &clause.corner {
            CornerBranch::Concave(c) => c,
            _ => panic!("expected Concave"),
        }
    }

    // --- Convex branch ---

    #[test]
    fn test_minimal_convex() {
        let clause = parse_ok("CORNERSPACING CONVEXCORNER WIDTH 0 SPACING 0.1 ;");
        assert_eq!(convex(&clause), &ConvexBranch::default());
        assert_eq!(clause.except_same, None);
        assert_eq!(
            clause.entries,
            vec![SpacingEntry {
                width: 0.0,
                spacing1: 0.1,
                spacing2: None,
            }]
        );
    }

    #[test]
    fn test_convex_all_modifiers() {
        let clause = parse_ok(
            "CORNERSPACING CONVEXCORNER SAMEMASK CORNERONLY 0.05 \
             EXCEPTEOL 0.08 EXCEPTJOGLENGTH 0.1 EDGELENGTH 0.2 INCLUDELSHAPE \
             WIDTH 0 SPACING 0.1 0.12 ;",
        );
        let c = convex(&clause);
        assert!(c.same_mask);
        assert_eq!(c.mode, Some(CornerModeNode::CornerOnly { within: 0.05 }));
        assert_eq!(
            c.except_eol,
            Some(ExceptEolNode {
                eol_width: 0.08,
                except_jog: Some(ExceptJogNode {
                    jog_length: 0.1,
                    edge_length: Some(0.2),
                    include_shape: true,
                }),
            })
        );
    }

    #[test]
    fn test_corner_to_corner() {
        let clause = parse_ok("CORNERSPACING CONVEXCORNER CORNERTOCORNER WIDTH 0.1 SPACING 0.2 0.3 ;");
        assert_eq!(convex(&clause).mode, Some(CornerModeNode::CornerToCorner));
        assert_eq!(clause.entries[0].spacing2, Some(0.3));
    }

    #[test]
    fn test_include_shape_without_edge_length() {
        let clause = parse_ok(
            "CORNERSPACING CONVEXCORNER EXCEPTEOL 0.1 EXCEPTJOGLENGTH 0.2 INCLUDELSHAPE \
             WIDTH 0 SPACING 1 ;",
        );
        let jog = convex(&clause)
            .except_eol
            .as_ref()
            .and_then(|e| e.except_jog.as_ref())
            .unwrap();
        assert_eq!(jog.edge_length, None);
        assert!(jog.include_shape);
    }

    #[test]
    fn test_corner_modes_are_exclusive() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER CORNERONLY 0.1 CORNERTOCORNER WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected { expected: "WIDTH", .. }
        ));
    }

    #[test]
    fn test_modifier_order_is_fixed() {
        // SAMEMASK must precede the corner mode
        assert!(parse(
            &tokenize("CORNERSPACING CONVEXCORNER CORNERTOCORNER SAMEMASK WIDTH 1 SPACING 2 ;")
                .unwrap()
        )
        .is_err());
    }

    #[test]
    fn test_include_shape_needs_jog_length() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER EXCEPTEOL 0.1 INCLUDELSHAPE WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected { found, .. } if found == "INCLUDELSHAPE"
        ));
    }

    // --- Concave branch ---

    #[test]
    fn test_concave_bare() {
        let clause = parse_ok("CORNERSPACING CONCAVECORNER WIDTH 1 SPACING 2 ;");
        assert_eq!(concave(&clause).min_length, None);
    }

    #[test]
    fn test_concave_except_notch_without_length() {
        let clause = parse_ok("CORNERSPACING CONCAVECORNER MINLENGTH 0.5 EXCEPTNOTCH WIDTH 1 SPACING 2 ;");
        assert_eq!(
            concave(&clause).min_length,
            Some(MinLengthNode {
                length: 0.5,
                except_notch: Some(None),
            })
        );
    }

    #[test]
    fn test_concave_except_notch_with_length() {
        let clause =
            parse_ok("CORNERSPACING CONCAVECORNER MINLENGTH 0.5 EXCEPTNOTCH 0.3 WIDTH 1 SPACING 2 ;");
        assert_eq!(
            concave(&clause).min_length.as_ref().unwrap().except_notch,
            Some(Some(0.3))
        );
    }

    #[test]
    fn test_convex_modifier_under_concave() {
        assert!(matches!(
            parse_err("CORNERSPACING CONCAVECORNER SAMEMASK WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected { found, .. } if found == "SAMEMASK"
        ));
    }

    #[test]
    fn test_concave_modifier_under_convex() {
        assert!(parse(
            &tokenize("CORNERSPACING CONVEXCORNER MINLENGTH 0.5 WIDTH 1 SPACING 2 ;").unwrap()
        )
        .is_err());
    }

    // --- Except same ---

    #[test]
    fn test_except_same_net() {
        let clause = parse_ok("CORNERSPACING CONCAVECORNER EXCEPTSAMENET WIDTH 1 SPACING 2 ;");
        assert_eq!(clause.except_same, Some(ExceptSameKind::Net));
    }

    #[test]
    fn test_except_same_metal() {
        let clause = parse_ok("CORNERSPACING CONVEXCORNER EXCEPTSAMEMETAL WIDTH 1 SPACING 2 ;");
        assert_eq!(clause.except_same, Some(ExceptSameKind::Metal));
    }

    #[test]
    fn test_except_same_only_once() {
        assert!(parse(
            &tokenize("CORNERSPACING CONVEXCORNER EXCEPTSAMENET EXCEPTSAMEMETAL WIDTH 1 SPACING 2 ;")
                .unwrap()
        )
        .is_err());
    }

    // --- Spacing entries ---

    #[test]
    fn test_multiple_entries_keep_order() {
        let clause = parse_ok(
            "CORNERSPACING CONVEXCORNER WIDTH 0 SPACING 0.1 WIDTH 0.2 SPACING 0.15 0.18 WIDTH 0 SPACING 0.3 ;",
        );
        let widths: Vec<f64> = clause.entries.iter().map(|e| e.width).collect();
        assert_eq!(widths, vec![0.0, 0.2, 0.0]);
        assert_eq!(clause.entries[1].spacing2, Some(0.18));
        assert_eq!(clause.entries[2].spacing2, None);
    }

    #[test]
    fn test_no_entries() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER ;"),
            ClauseError::Expected { expected: "WIDTH", .. }
        ));
    }

    #[test]
    fn test_entry_missing_spacing() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER WIDTH 1 ;"),
            ClauseError::Expected { expected: "SPACING", .. }
        ));
    }

    #[test]
    fn test_third_spacing_value_rejected() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER WIDTH 1 SPACING 2 3 4 ;"),
            ClauseError::Expected { expected: "WIDTH or ';'", .. }
        ));
    }

    // --- Clause framing ---

    #[test]
    fn test_missing_terminator() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER WIDTH 1 SPACING 2"),
            ClauseError::UnexpectedEnd { .. }
        ));
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER WIDTH 1 SPACING 2 ; WIDTH"),
            ClauseError::TrailingInput { offset: 47 }
        ));
    }

    #[test]
    fn test_missing_corner_type() {
        assert!(matches!(
            parse_err("CORNERSPACING WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected {
                expected: "CONVEXCORNER or CONCAVECORNER",
                ..
            }
        ));
    }

    #[test]
    fn test_must_start_with_cornerspacing() {
        assert!(matches!(
            parse_err("CONVEXCORNER WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected {
                expected: "CORNERSPACING",
                offset: 0,
                ..
            }
        ));
        assert!(matches!(
            parse_err(""),
            ClauseError::UnexpectedEnd {
                expected: "CORNERSPACING"
            }
        ));
    }

    #[test]
    fn test_keyword_without_value() {
        assert!(matches!(
            parse_err("CORNERSPACING CONVEXCORNER CORNERONLY WIDTH 1 SPACING 2 ;"),
            ClauseError::Expected {
                expected: "CORNERONLY distance",
                ..
            }
        ));
    }
}
