//! Damage-dice formulas and their averages
//!
//! Supports formulas like "2d6+3" and "1d6+1d4+2", optionally containing
//! ability placeholders ("1d8+[STR]") that are substituted with the signed
//! modifier before the dice terms are scanned. Averages are arithmetic
//! means, not rolls.

use super::{Ability, AbilityScores};
use crate::rules::Ruleset;

/// A single dice term: `<count>d<sides>` with an optional flat modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceTerm {
    pub count: u32,
    pub sides: u32,
    pub flat: i32,
}

impl DiceTerm {
    /// Rounded arithmetic mean of rolling this term:
    /// round(count * (sides + 1) / 2 + flat), with .5 rounding up.
    pub fn average(&self) -> i32 {
        let twice_mean = self.count * (self.sides + 1);
        (twice_mean as i32 + 1) / 2 + self.flat
    }
}

/// A damage formula resolved against a creature's ability scores.
///
/// Holds the substituted display text alongside the scanned dice terms so a
/// renderer can produce `"<average> (<formula>)"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageFormula {
    text: String,
    terms: Vec<DiceTerm>,
}

impl DamageFormula {
    /// Substitute ability placeholders, then scan the result for dice terms.
    pub fn resolve(raw: &str, scores: &AbilityScores, rules: &Ruleset) -> Self {
        let text = substitute_placeholders(raw, scores, rules);
        let terms = scan_dice_terms(&text);
        Self { text, terms }
    }

    /// The formula text after placeholder substitution.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The scanned dice terms.
    pub fn terms(&self) -> &[DiceTerm] {
        &self.terms
    }

    /// Sum of per-term averages, or `None` when the formula contains no
    /// dice term (callers fall back to the substituted literal text).
    pub fn average(&self) -> Option<i32> {
        if self.terms.is_empty() {
            return None;
        }
        Some(self.terms.iter().map(DiceTerm::average).sum())
    }
}

/// Replace `[STR]`..`[CHA]` with the decimal modifier value. A "+-" pair
/// produced by a negative modifier collapses to "-" so "1d8+[STR]" with a -2
/// modifier reads "1d8-2".
fn substitute_placeholders(raw: &str, scores: &AbilityScores, rules: &Ruleset) -> String {
    let mut text = raw.trim().to_string();
    for ability in Ability::ALL {
        let placeholder = format!("[{}]", ability.abbrev());
        if text.contains(&placeholder) {
            let modifier = rules.ability_modifier(scores.get(ability));
            text = text.replace(&placeholder, &modifier.to_string());
        }
    }
    text.replace("+-", "-")
}

/// Scan for `<count>d<sides>[+|-<flat>]` terms.
///
/// A +/- suffix only counts as this term's flat modifier when the digits
/// after it do not begin another dice term, so "1d6+1d4+2" scans as
/// [1d6, 1d4+2] rather than swallowing "+1" into the first term.
fn scan_dice_terms(text: &str) -> Vec<DiceTerm> {
    let bytes = text.as_bytes();
    let mut terms = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let Some((count, after_count)) = read_number(bytes, pos) else {
            pos += 1;
            continue;
        };
        if after_count >= bytes.len() || !matches!(bytes[after_count], b'd' | b'D') {
            pos = after_count;
            continue;
        }
        let Some((sides, after_sides)) = read_number(bytes, after_count + 1) else {
            pos = after_count + 1;
            continue;
        };

        let mut flat = 0;
        let mut next = after_sides;
        if next < bytes.len() && matches!(bytes[next], b'+' | b'-') {
            let sign = if bytes[next] == b'-' { -1 } else { 1 };
            if let Some((value, after_flat)) = read_number(bytes, next + 1) {
                let starts_new_term =
                    after_flat < bytes.len() && matches!(bytes[after_flat], b'd' | b'D');
                if !starts_new_term {
                    flat = sign * value as i32;
                    next = after_flat;
                }
            }
        }

        if count > 0 && sides > 0 {
            terms.push(DiceTerm { count, sides, flat });
        }
        pos = next;
    }

    terms
}

/// Read a run of ASCII digits starting at `pos`; returns the value and the
/// index one past the run.
fn read_number(bytes: &[u8], pos: usize) -> Option<(u32, usize)> {
    let mut end = pos;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == pos {
        return None;
    }
    let value = std::str::from_utf8(&bytes[pos..end])
        .ok()?
        .parse::<u32>()
        .ok()?;
    Some((value, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores() -> AbilityScores {
        // STR 16 (+3), DEX 7 (-2), others 10
        AbilityScores::new(16, 7, 10, 10, 10, 10)
    }

    #[test]
    fn test_simple_average() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("2d6+3", &scores(), &rules);
        assert_eq!(formula.average(), Some(10));
        assert_eq!(formula.text(), "2d6+3");
    }

    #[test]
    fn test_half_averages_round_up() {
        let rules = Ruleset::srd();
        // 1d4 has mean 2.5
        let formula = DamageFormula::resolve("1d4", &scores(), &rules);
        assert_eq!(formula.average(), Some(3));
    }

    #[test]
    fn test_multi_term_formula() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("1d6+1d4+2", &scores(), &rules);
        assert_eq!(
            formula.terms(),
            &[
                DiceTerm {
                    count: 1,
                    sides: 6,
                    flat: 0
                },
                DiceTerm {
                    count: 1,
                    sides: 4,
                    flat: 2
                },
            ]
        );
        // round(3.5) + round(2.5 + 2) = 4 + 5
        assert_eq!(formula.average(), Some(9));
    }

    #[test]
    fn test_positive_placeholder_substitution() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("1d8+[STR]", &scores(), &rules);
        assert_eq!(formula.text(), "1d8+3");
        // round(4.5 + 3)
        assert_eq!(formula.average(), Some(8));
    }

    #[test]
    fn test_negative_placeholder_substitution() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("1d8+[DEX]", &scores(), &rules);
        assert_eq!(formula.text(), "1d8-2");
        assert_eq!(formula.average(), Some(3));
    }

    #[test]
    fn test_negative_flat_modifier() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("2d10-1", &scores(), &rules);
        assert_eq!(formula.average(), Some(10));
    }

    #[test]
    fn test_no_dice_term_has_no_average() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("half of [STR]", &scores(), &rules);
        assert_eq!(formula.average(), None);
        assert_eq!(formula.text(), "half of 3");
    }

    #[test]
    fn test_uppercase_d_accepted() {
        let rules = Ruleset::srd();
        let formula = DamageFormula::resolve("2D6", &scores(), &rules);
        assert_eq!(formula.average(), Some(7));
    }
}
