//! Value objects - Immutable objects defined by their attributes

mod ability;
mod bonus;
mod challenge;
mod dice;
mod skill;

pub use ability::{Ability, AbilityScores};
pub use bonus::{BonusExpr, BonusTerm};
pub use challenge::{ChallengeRating, CrParseError};
pub use dice::{DamageFormula, DiceTerm};
pub use skill::{ProficiencyLevel, Skill};
