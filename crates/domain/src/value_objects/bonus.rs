//! Attack-bonus shorthand expressions
//!
//! Supports a plain integer ("4"), or a bracketed token list with an
//! optional flat add-on: "[STR ATK]", "[DEX ATK]+1". STR..CHA resolve to the
//! matching ability modifier and ATK to the creature's proficiency bonus.

use std::str::FromStr;

use tracing::warn;

use super::{Ability, AbilityScores, ChallengeRating};
use crate::rules::Ruleset;

/// One token of a bonus shorthand expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusTerm {
    /// STR..CHA - the creature's modifier for that ability
    Ability(Ability),
    /// ATK - the creature's proficiency bonus
    Proficiency,
}

/// A parsed bonus expression.
///
/// Callers must distinguish "no bonus configured" from "bonus of zero", so
/// [`BonusExpr::parse`] returns `None` for empty input and for strings that
/// match neither form, rather than defaulting to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BonusExpr {
    /// A plain numeric literal, used as-is
    Flat(i32),
    /// A bracketed token list plus a flat add-on (0 when absent)
    Shorthand { terms: Vec<BonusTerm>, flat: i32 },
}

impl BonusExpr {
    /// Parse a bonus expression string.
    ///
    /// Unrecognized tokens inside the brackets are logged and dropped; they
    /// contribute zero rather than failing the whole expression.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(value) = input.parse::<i32>() {
            return Some(Self::Flat(value));
        }

        let open = input.find('[')?;
        let close = input[open..].find(']').map(|i| open + i)?;

        // Trailing "]+N" is a flat add-on on top of the token total
        let flat = input[close + 1..]
            .strip_prefix('+')
            .and_then(|rest| rest.trim().parse::<i32>().ok())
            .unwrap_or(0);

        let mut terms = Vec::new();
        for token in input[open + 1..close].split_whitespace() {
            if token.eq_ignore_ascii_case("ATK") {
                terms.push(BonusTerm::Proficiency);
            } else if let Ok(ability) = Ability::from_str(token) {
                terms.push(BonusTerm::Ability(ability));
            } else {
                warn!(token, expression = input, "Unrecognized bonus token");
            }
        }

        Some(Self::Shorthand { terms, flat })
    }

    /// Evaluate against a creature's scores and challenge rating.
    pub fn evaluate(
        &self,
        scores: &AbilityScores,
        challenge_rating: ChallengeRating,
        rules: &Ruleset,
    ) -> i32 {
        match self {
            Self::Flat(value) => *value,
            Self::Shorthand { terms, flat } => {
                let total: i32 = terms
                    .iter()
                    .map(|term| match term {
                        BonusTerm::Ability(ability) => {
                            rules.ability_modifier(scores.get(*ability))
                        }
                        BonusTerm::Proficiency => rules.proficiency_bonus(challenge_rating),
                    })
                    .sum();
                total + flat
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> AbilityScores {
        // STR 16 (+3), DEX 12 (+1), others 10
        AbilityScores::new(16, 12, 10, 10, 10, 10)
    }

    #[test]
    fn test_parse_empty_is_no_bonus() {
        assert_eq!(BonusExpr::parse(""), None);
        assert_eq!(BonusExpr::parse("   "), None);
    }

    #[test]
    fn test_parse_plain_integer() {
        assert_eq!(BonusExpr::parse("7"), Some(BonusExpr::Flat(7)));
        assert_eq!(BonusExpr::parse("-2"), Some(BonusExpr::Flat(-2)));
    }

    #[test]
    fn test_parse_shorthand() {
        let expr = BonusExpr::parse("[STR ATK]").expect("parse");
        assert_eq!(
            expr,
            BonusExpr::Shorthand {
                terms: vec![BonusTerm::Ability(Ability::Strength), BonusTerm::Proficiency],
                flat: 0,
            }
        );
    }

    #[test]
    fn test_parse_shorthand_with_flat() {
        let expr = BonusExpr::parse("[DEX ATK]+1").expect("parse");
        assert_eq!(
            expr,
            BonusExpr::Shorthand {
                terms: vec![
                    BonusTerm::Ability(Ability::Dexterity),
                    BonusTerm::Proficiency
                ],
                flat: 1,
            }
        );
    }

    #[test]
    fn test_parse_without_brackets_is_no_bonus() {
        assert_eq!(BonusExpr::parse("STR ATK"), None);
    }

    #[test]
    fn test_unknown_token_contributes_zero() {
        let rules = Ruleset::srd();
        let expr = BonusExpr::parse("[STR LUCK ATK]").expect("parse");
        // CR 1 -> proficiency +2; STR +3; LUCK dropped
        let total = expr.evaluate(&scores(), ChallengeRating::whole(1), &rules);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_evaluate_str_atk() {
        let rules = Ruleset::srd();
        let expr = BonusExpr::parse("[STR ATK]").expect("parse");
        let total = expr.evaluate(&scores(), ChallengeRating::whole(1), &rules);
        assert_eq!(crate::rules::format_signed(total), "+5");
    }

    #[test]
    fn test_evaluate_dex_atk_plus_one() {
        let rules = Ruleset::srd();
        let expr = BonusExpr::parse("[DEX ATK]+1").expect("parse");
        let total = expr.evaluate(&scores(), ChallengeRating::whole(1), &rules);
        assert_eq!(crate::rules::format_signed(total), "+4");
    }
}
