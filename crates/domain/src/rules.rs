//! Rule tables and ability math.
//!
//! A [`Ruleset`] bundles the two lookup tables every derivation depends on:
//! the skill -> governing ability map and the challenge rating -> experience
//! ladder. The tables are plain data handed in at construction, so a
//! homebrew ladder can be substituted without touching calculation code.

use crate::error::DomainError;
use crate::value_objects::{Ability, ChallengeRating, Skill};

/// Immutable rule configuration: lookup tables plus the ability-math
/// formulas that read them.
#[derive(Debug, Clone)]
pub struct Ruleset {
    skill_abilities: Vec<(Skill, Ability)>,
    xp_ladder: Vec<(ChallengeRating, i32)>,
}

impl Default for Ruleset {
    fn default() -> Self {
        Self::srd()
    }
}

impl Ruleset {
    /// The standard tables: the fixed 18-entry skill map and the published
    /// CR 0 - 30 experience ladder.
    pub fn srd() -> Self {
        Self::new(srd_skill_abilities(), srd_xp_ladder())
    }

    /// A ruleset with substituted tables (homebrew ladders etc.).
    pub fn new(
        skill_abilities: Vec<(Skill, Ability)>,
        xp_ladder: Vec<(ChallengeRating, i32)>,
    ) -> Self {
        Self {
            skill_abilities,
            xp_ladder,
        }
    }

    /// Ability modifier from a raw score: floor((score - 10) / 2).
    ///
    /// Rust's `/` rounds toward zero, so the negative side is floored
    /// explicitly.
    pub fn ability_modifier(&self, score: i32) -> i32 {
        let diff = score - 10;
        if diff >= 0 {
            diff / 2
        } else {
            (diff - 1) / 2
        }
    }

    /// Proficiency bonus from challenge rating:
    /// max(floor((cr - 1) / 4), 0) + 2, never below +2.
    pub fn proficiency_bonus(&self, cr: ChallengeRating) -> i32 {
        if cr.is_below_one() {
            return 2;
        }
        let whole = (cr.numerator() / cr.denominator()) as i32;
        (whole - 1) / 4 + 2
    }

    /// Experience points for a challenge rating. Exact ladder lookup;
    /// values off the ladder are an error, never interpolated.
    pub fn xp_for_cr(&self, cr: ChallengeRating) -> Result<i32, DomainError> {
        self.xp_ladder
            .iter()
            .find(|(key, _)| *key == cr)
            .map(|(_, xp)| *xp)
            .ok_or(DomainError::UnknownChallengeRating(cr))
    }

    /// Governing ability for a skill, per the configured table.
    pub fn skill_ability(&self, skill: Skill) -> Option<Ability> {
        self.skill_abilities
            .iter()
            .find(|(key, _)| *key == skill)
            .map(|(_, ability)| *ability)
    }
}

/// Signed display form used everywhere a modifier or bonus is shown:
/// "+3", "+0", "-1".
pub fn format_signed(value: i32) -> String {
    if value >= 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

fn srd_skill_abilities() -> Vec<(Skill, Ability)> {
    vec![
        (Skill::Acrobatics, Ability::Dexterity),
        (Skill::AnimalHandling, Ability::Wisdom),
        (Skill::Arcana, Ability::Intelligence),
        (Skill::Athletics, Ability::Strength),
        (Skill::Deception, Ability::Charisma),
        (Skill::History, Ability::Intelligence),
        (Skill::Insight, Ability::Wisdom),
        (Skill::Intimidation, Ability::Charisma),
        (Skill::Investigation, Ability::Intelligence),
        (Skill::Medicine, Ability::Wisdom),
        (Skill::Nature, Ability::Intelligence),
        (Skill::Perception, Ability::Wisdom),
        (Skill::Performance, Ability::Charisma),
        (Skill::Persuasion, Ability::Charisma),
        (Skill::Religion, Ability::Intelligence),
        (Skill::SleightOfHand, Ability::Dexterity),
        (Skill::Stealth, Ability::Dexterity),
        (Skill::Survival, Ability::Wisdom),
    ]
}

fn srd_xp_ladder() -> Vec<(ChallengeRating, i32)> {
    let mut ladder = vec![
        (ChallengeRating::ZERO, 0),
        (ChallengeRating::EIGHTH, 25),
        (ChallengeRating::QUARTER, 50),
        (ChallengeRating::HALF, 100),
    ];
    let whole_xp = [
        200, 450, 700, 1100, 1800, 2300, 2900, 3900, 5000, 5900, 7200, 8400, 10000, 11500, 13000,
        15000, 18000, 20000, 22000, 25000, 33000, 41000, 50000, 62000, 76000, 90000, 105000,
        120000, 137000, 155000,
    ];
    ladder.extend(
        whole_xp
            .iter()
            .enumerate()
            .map(|(i, &xp)| (ChallengeRating::whole(i as u32 + 1), xp)),
    );
    ladder
}
