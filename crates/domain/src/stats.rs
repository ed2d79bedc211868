//! Derived-stat computation over a full statblock record.
//!
//! [`calculate_dependent_stats`] is pure and total: it reads only the raw
//! fields of the record, never fails for well-typed input, and recomputing
//! with unchanged inputs yields identical output. Callers merge the
//! resulting partial record into their copy of the statblock.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entities::{MonsterStatblock, Senses};
use crate::rules::Ruleset;
use crate::value_objects::{Ability, Skill};

/// The derived fields of a statblock. Every field here is a function of the
/// raw fields; none is independently settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedStats {
    /// Saving-throw total per ability (all six present)
    pub saving_throws: BTreeMap<Ability, i32>,
    /// Final skill bonus per skill (all 18 present)
    pub skills: BTreeMap<Skill, i32>,
    pub passive_perception: i32,
    /// Display string: "darkvision 60 ft., passive Perception 14"
    pub senses: String,
    pub damage_vulnerabilities: String,
    pub damage_resistances: String,
    pub damage_immunities: String,
    pub condition_immunities: String,
}

impl DerivedStats {
    /// Saving-throw total for one ability.
    pub fn save(&self, ability: Ability) -> i32 {
        self.saving_throws.get(&ability).copied().unwrap_or(0)
    }

    /// Final bonus for one skill.
    pub fn skill(&self, skill: Skill) -> i32 {
        self.skills.get(&skill).copied().unwrap_or(0)
    }
}

/// Recompute every derived field from the record's current raw fields.
pub fn calculate_dependent_stats(monster: &MonsterStatblock, rules: &Ruleset) -> DerivedStats {
    let prof = rules.proficiency_bonus(monster.challenge_rating);

    let saving_throws: BTreeMap<Ability, i32> = Ability::ALL
        .into_iter()
        .map(|ability| {
            let modifier = rules.ability_modifier(monster.abilities.get(ability));
            let bonus = if monster.is_save_proficient(ability) {
                prof
            } else {
                0
            };
            (ability, modifier + bonus)
        })
        .collect();

    let skills: BTreeMap<Skill, i32> = Skill::ALL
        .into_iter()
        .map(|skill| {
            let modifier = rules
                .skill_ability(skill)
                .map(|ability| rules.ability_modifier(monster.abilities.get(ability)))
                .unwrap_or(0);
            let level = monster.skill_proficiency(skill);
            (skill, modifier + level.multiplier() * prof)
        })
        .collect();

    // Passive perception uses the final skill bonus, so proficiency and
    // expertise flow through without a second formula.
    let passive_perception = 10 + skills.get(&Skill::Perception).copied().unwrap_or(0);

    DerivedStats {
        senses: senses_string(&monster.senses, passive_perception),
        saving_throws,
        skills,
        passive_perception,
        damage_vulnerabilities: monster.damage_vulnerabilities.join(", "),
        damage_resistances: monster.damage_resistances.join(", "),
        damage_immunities: monster.damage_immunities.join(", "),
        condition_immunities: monster.condition_immunities.join(", "),
    }
}

/// Compose the senses display string in fixed order, ending with passive
/// Perception even when no sense radius is set.
fn senses_string(senses: &Senses, passive_perception: i32) -> String {
    let mut parts = Vec::new();

    if senses.blindsight > 0 {
        let suffix = if senses.blind_beyond {
            " (blind beyond this radius)"
        } else {
            ""
        };
        parts.push(format!("blindsight {} ft.{}", senses.blindsight, suffix));
    }
    if senses.darkvision > 0 {
        parts.push(format!("darkvision {} ft.", senses.darkvision));
    }
    if senses.tremorsense > 0 {
        parts.push(format!("tremorsense {} ft.", senses.tremorsense));
    }
    if senses.truesight > 0 {
        parts.push(format!("truesight {} ft.", senses.truesight));
    }

    parts.push(format!("passive Perception {}", passive_perception));
    parts.join(", ")
}
