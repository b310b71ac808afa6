//! Progression rules.
//!
//! Pure functions turning accumulated points into levels and prestige tiers.
//! The action resolver calls into these after every points gain; nothing
//! else mutates `level` or `prestige`.

pub mod progression;

pub use progression::{
    apply_progression, level_threshold, next_threshold, points_to_next, prestige_threshold, progressed,
    Advancement, PRESTIGE_BASE_COST,
};
