//! Statforge domain - monster statblock records, rule tables, and the
//! derived-stat calculator.
//!
//! Everything in this crate is pure computation: no I/O, no shared mutable
//! state. Callers construct a [`MonsterStatblock`], run
//! [`calculate_dependent_stats`] whenever a raw field changes, and merge the
//! resulting [`DerivedStats`] into their copy of the record.

pub mod entities;
pub mod error;
pub mod ids;
pub mod rules;
pub mod stats;
pub mod value_objects;

// Re-export entities (explicit list in entities/mod.rs)
pub use entities::{
    ActionKind, DamageRoll, MonsterAction, MonsterStatblock, MovementSpeed, Senses,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::MonsterId;

pub use rules::{format_signed, Ruleset};
pub use stats::{calculate_dependent_stats, DerivedStats};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    Ability, AbilityScores, BonusExpr, BonusTerm, ChallengeRating, CrParseError, DamageFormula,
    DiceTerm, ProficiencyLevel, Skill,
};
