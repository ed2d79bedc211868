//! Entities - Objects with identity that persist over time

mod monster;

pub use monster::{ActionKind, DamageRoll, MonsterAction, MonsterStatblock, MovementSpeed, Senses};
