//! Skill variants.
//!
//! Every fish is described by one passive and one active variant; the
//! resolver dispatches over these tags. There is no per-fish behavior code
//! anywhere else — two fish sharing a variant differ only in parameters.

use serde::{Deserialize, Serialize};

/// Passive skill, carried by every fish definition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Passive {
    /// Chance to negate an incoming hit entirely.
    Dodge { chance: f64 },

    /// `shields` consumable full-hit absorbers; once they are spent the
    /// fish falls back to the same dodge chance.
    ShellGuard { shields: u8, chance: f64 },

    /// Keeps `retain_pct`% of every direct hit, spreading the remainder
    /// among living teammates. Gains `growth_gain` ATK permanently for
    /// every `growth_step` points of raw (pre-share) damage taken.
    DamageSpread {
        retain_pct: i32,
        growth_step: i32,
        growth_gain: i32,
    },

    /// Heals after surviving a hit.
    Mending { heal: i32 },

    /// Mending, plus a one-time permanent ATK surge on dropping below
    /// `surge_below` HP, plus a death-rattle strike on the killer.
    LastStand {
        heal: i32,
        surge_below: i32,
        surge_gain: i32,
        rattle: i32,
    },

    /// Strikes an enemy attacker whenever this fish ends a hit below
    /// `below_hp`.
    Counter { below_hp: i32, strike: i32 },

    /// Strikes an enemy attacker whenever a teammate ends a hit alive and
    /// below `below_hp`.
    AllyGuard { below_hp: i32, strike: i32 },

    /// Catalog placeholder for the Mimic Fish. Resolved to a copy of the
    /// companion's passive at selection time; never present on a runtime
    /// entity.
    Mimicry,
}

/// Active skill, chosen as a turn action.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActiveSkill {
    /// Hit every living enemy for `atk_pct`% of snapshot ATK.
    AoeBurst { atk_pct: i32 },

    /// Deal `cost` flat damage to a chosen teammate (the actor itself
    /// qualifies), then gain `atk_gain` ATK permanently.
    Sacrifice { cost: i32, atk_gain: i32 },

    /// Flat critical strike on a chosen enemy.
    CriticalStrike { damage: i32 },

    /// A chosen teammate's next incoming hit is reduced by `reduce_pct`%;
    /// the actor gains `atk_gain` ATK permanently.
    Ward { reduce_pct: i32, atk_gain: i32 },

    /// A chosen teammate heals `heal` on its next incoming hit. The first
    /// `strike_uses` uses additionally deal a flat `strike` critical to a
    /// chosen enemy.
    Succor {
        heal: i32,
        strike: i32,
        strike_uses: u32,
    },

    /// Hit the lowest-HP living enemy (ties: lowest position) for
    /// `atk_pct`% of snapshot ATK, or `frenzy_pct`% if that enemy is below
    /// `frenzy_below` HP.
    Hunt {
        atk_pct: i32,
        frenzy_pct: i32,
        frenzy_below: i32,
    },

    /// A chosen teammate's next incoming hit is damage-shared with its
    /// team: the teammate keeps `keep_pct`%, the rest spreads. The first
    /// `burst_uses` uses additionally hit every living enemy for
    /// `burst_pct`% of snapshot ATK.
    ShareWard {
        keep_pct: i32,
        burst_pct: i32,
        burst_uses: u32,
    },

    /// Catalog placeholder for the Mimic Fish; resolved at selection time.
    Mimicry,
}

impl ActiveSkill {
    /// Whether the skill needs a teammate target from the decision.
    #[must_use]
    pub fn wants_teammate(&self) -> bool {
        matches!(
            self,
            Self::Sacrifice { .. } | Self::Ward { .. } | Self::Succor { .. } | Self::ShareWard { .. }
        )
    }

    /// Whether the skill needs an enemy target from the decision.
    ///
    /// For `Succor` this is only true while its critical strike is still
    /// available; the caller checks the usage counter.
    #[must_use]
    pub fn wants_enemy(&self) -> bool {
        matches!(self, Self::CriticalStrike { .. } | Self::Succor { .. })
    }
}
