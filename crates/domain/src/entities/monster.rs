//! The monster statblock aggregate and its parts.
//!
//! Every optional field deserializes to an identity default (zero, empty
//! string, empty list), so downstream calculation code never branches on
//! presence. Derived fields are NOT stored here; they live in
//! [`crate::stats::DerivedStats`] and are recomputed whenever a raw field
//! changes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::MonsterId;
use crate::value_objects::{Ability, AbilityScores, ChallengeRating, ProficiencyLevel, Skill};

/// One damage roll of an attack: a dice formula plus its damage type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DamageRoll {
    /// Dice formula, possibly with ability placeholders ("1d8+[STR]")
    pub formula: String,
    pub damage_type: String,
}

impl DamageRoll {
    pub fn new(formula: impl Into<String>, damage_type: impl Into<String>) -> Self {
        Self {
            formula: formula.into(),
            damage_type: damage_type.into(),
        }
    }
}

/// The attack-type tag of an action. Determines the range phrase the
/// renderer uses; `Ability` marks pure flavor entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "Melee Weapon Attack")]
    MeleeWeapon,
    #[serde(rename = "Ranged Weapon Attack")]
    RangedWeapon,
    #[serde(rename = "Melee Spell Attack")]
    MeleeSpell,
    #[serde(rename = "Ranged Spell Attack")]
    RangedSpell,
    #[serde(rename = "Melee or Ranged Weapon Attack")]
    MeleeOrRanged,
    #[serde(rename = "Ability")]
    Ability,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::MeleeWeapon => "Melee Weapon Attack",
            ActionKind::RangedWeapon => "Ranged Weapon Attack",
            ActionKind::MeleeSpell => "Melee Spell Attack",
            ActionKind::RangedSpell => "Ranged Spell Attack",
            ActionKind::MeleeOrRanged => "Melee or Ranged Weapon Attack",
            ActionKind::Ability => "Ability",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ActionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "melee weapon attack" | "melee" => Ok(ActionKind::MeleeWeapon),
            "ranged weapon attack" | "ranged" => Ok(ActionKind::RangedWeapon),
            "melee spell attack" => Ok(ActionKind::MeleeSpell),
            "ranged spell attack" => Ok(ActionKind::RangedSpell),
            "melee or ranged weapon attack" => Ok(ActionKind::MeleeOrRanged),
            "ability" => Ok(ActionKind::Ability),
            _ => Err(DomainError::parse(format!("Unknown action kind: {}", s))),
        }
    }
}

/// An action, bonus action, reaction, or special ability.
///
/// Entries whose kind is [`ActionKind::Ability`], or that carry no attack
/// bonus, are flavor text only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonsterAction {
    pub name: String,
    pub desc: String,
    pub kind: Option<ActionKind>,
    /// Numeric literal or bracket shorthand ("[STR ATK]+1")
    pub attack_bonus: Option<String>,
    pub reach: Option<i32>,
    pub short_range: Option<i32>,
    pub long_range: Option<i32>,
    pub damage: Vec<DamageRoll>,
    pub targets: Option<String>,
    /// Rider text appended after the damage clause
    pub effect: Option<String>,
}

impl MonsterAction {
    /// A pure flavor entry: name and description only.
    pub fn flavor(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            ..Self::default()
        }
    }

    /// True when this entry renders as flavor text rather than an attack
    /// line. An empty attack-bonus string counts as no bonus.
    pub fn is_flavor(&self) -> bool {
        matches!(self.kind, Some(ActionKind::Ability))
            || self
                .attack_bonus
                .as_deref()
                .map_or(true, |bonus| bonus.trim().is_empty())
    }
}

/// Movement speeds in feet. `hover` is a flag, not a speed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementSpeed {
    pub walk: Option<u32>,
    pub climb: Option<u32>,
    pub swim: Option<u32>,
    pub fly: Option<u32>,
    pub burrow: Option<u32>,
    pub hover: bool,
    pub notes: Option<String>,
}

/// Sense radii in feet; a radius of zero means the sense is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Senses {
    pub blindsight: u32,
    /// When set, the creature cannot see past its blindsight radius
    pub blind_beyond: bool,
    pub darkvision: u32,
    pub tremorsense: u32,
    pub truesight: u32,
}

/// The central aggregate: raw statblock fields as entered by the author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MonsterStatblock {
    pub id: MonsterId,
    pub name: String,
    pub desc: Option<String>,
    pub size: Option<String>,
    #[serde(rename = "type")]
    pub creature_type: Option<String>,
    pub subtype: Option<String>,
    pub alignment: Option<String>,

    pub armor_class: Option<i32>,
    pub armor_desc: Option<String>,
    pub hit_points: Option<i32>,
    pub hit_dice: Option<String>,
    pub speed: MovementSpeed,

    pub abilities: AbilityScores,
    pub challenge_rating: ChallengeRating,

    /// Abilities with saving-throw proficiency (set semantics)
    pub save_proficiencies: Vec<Ability>,
    /// Skills with an explicit proficiency entry; absence means none
    pub skill_proficiencies: BTreeMap<Skill, ProficiencyLevel>,

    pub senses: Senses,

    pub damage_vulnerabilities: Vec<String>,
    pub damage_resistances: Vec<String>,
    pub damage_immunities: Vec<String>,
    pub condition_immunities: Vec<String>,

    pub languages: Option<String>,

    pub special_abilities: Vec<MonsterAction>,
    pub actions: Vec<MonsterAction>,
    pub bonus_actions: Vec<MonsterAction>,
    pub reactions: Vec<MonsterAction>,
    pub legendary_desc: Option<String>,
    pub legendary_actions: Vec<MonsterAction>,
    pub mythic_desc: Option<String>,
    pub mythic_actions: Vec<MonsterAction>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl MonsterStatblock {
    /// A fresh record with every optional field at its identity default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MonsterId::new(),
            name: name.into(),
            created_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn with_challenge_rating(mut self, cr: ChallengeRating) -> Self {
        self.challenge_rating = cr;
        self
    }

    /// Whether the creature adds its proficiency bonus to saves with this
    /// ability.
    pub fn is_save_proficient(&self, ability: Ability) -> bool {
        self.save_proficiencies.contains(&ability)
    }

    /// The proficiency level for a skill; missing entries are `None`.
    pub fn skill_proficiency(&self, skill: Skill) -> ProficiencyLevel {
        self.skill_proficiencies
            .get(&skill)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_identity_defaults() {
        let monster = MonsterStatblock::new("Goblin");
        assert_eq!(monster.name, "Goblin");
        assert_eq!(monster.challenge_rating, ChallengeRating::ZERO);
        assert!(monster.actions.is_empty());
        assert!(monster.damage_resistances.is_empty());
        assert_eq!(monster.senses, Senses::default());
        assert_eq!(monster.skill_proficiency(Skill::Stealth), ProficiencyLevel::None);
        assert!(!monster.is_save_proficient(Ability::Dexterity));
    }

    #[test]
    fn test_flavor_detection() {
        let flavor = MonsterAction::flavor("Keen Smell", "Advantage on smell checks.");
        assert!(flavor.is_flavor());

        let typed_ability = MonsterAction {
            kind: Some(ActionKind::Ability),
            attack_bonus: Some("[STR ATK]".to_string()),
            ..MonsterAction::flavor("Pack Tactics", "...")
        };
        assert!(typed_ability.is_flavor());

        let empty_bonus = MonsterAction {
            kind: Some(ActionKind::MeleeWeapon),
            attack_bonus: Some("  ".to_string()),
            ..MonsterAction::default()
        };
        assert!(empty_bonus.is_flavor());

        let attack = MonsterAction {
            kind: Some(ActionKind::MeleeWeapon),
            attack_bonus: Some("4".to_string()),
            ..MonsterAction::default()
        };
        assert!(!attack.is_flavor());
    }

    #[test]
    fn test_action_kind_parse() {
        assert_eq!(
            "Melee Weapon Attack".parse::<ActionKind>().ok(),
            Some(ActionKind::MeleeWeapon)
        );
        assert_eq!("ability".parse::<ActionKind>().ok(), Some(ActionKind::Ability));
        assert!("Psychic Assault".parse::<ActionKind>().is_err());
    }

    #[test]
    fn test_serde_roundtrip_preserves_raw_fields() {
        let mut monster = MonsterStatblock::new("Spy")
            .with_abilities(AbilityScores::new(10, 15, 10, 12, 14, 16))
            .with_challenge_rating(ChallengeRating::whole(1));
        monster.save_proficiencies = vec![Ability::Dexterity];
        monster
            .skill_proficiencies
            .insert(Skill::Stealth, ProficiencyLevel::Expertise);
        monster.senses.darkvision = 60;
        monster.actions.push(MonsterAction {
            name: "Shortsword".to_string(),
            kind: Some(ActionKind::MeleeWeapon),
            attack_bonus: Some("[DEX ATK]".to_string()),
            reach: Some(5),
            targets: Some("one target".to_string()),
            damage: vec![DamageRoll::new("1d6+[DEX]", "piercing")],
            ..MonsterAction::default()
        });

        let json = serde_json::to_string(&monster).expect("serialize");
        let back: MonsterStatblock = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, monster);
    }

    #[test]
    fn test_partial_record_normalizes() {
        // A record with only a name fills every other field with identity
        // defaults on ingestion.
        let json = r#"{"name":"Husk"}"#;
        let monster: MonsterStatblock = serde_json::from_str(json).expect("deserialize");
        assert_eq!(monster.name, "Husk");
        assert_eq!(monster.abilities, AbilityScores::default());
        assert!(monster.legendary_actions.is_empty());
        assert_eq!(monster.speed, MovementSpeed::default());
    }

    #[test]
    fn test_action_kind_wire_form() {
        let action = MonsterAction {
            kind: Some(ActionKind::MeleeOrRanged),
            ..MonsterAction::default()
        };
        let json = serde_json::to_value(&action).expect("serialize");
        assert_eq!(json["kind"], "Melee or Ranged Weapon Attack");
    }
}
