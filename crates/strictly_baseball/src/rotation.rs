//! Who bats and who pitches next.
//!
//! The controller only needs display cards, so the batting order sits behind
//! [`BattingRotation`]. [`NamePool`] cycles one fixed list of names for both
//! teams; [`LineupRotation`] keeps a real nine-slot order per side.

use crate::types::{PlayerCard, Side};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Slots in a batting order.
pub const LINEUP_SLOTS: usize = 9;

/// Source of batter and pitcher display cards.
pub trait BattingRotation {
    /// The batter now due up for `side`.
    fn current_batter(&self, side: Side) -> PlayerCard;

    /// Moves `side` to its next batter and returns them.
    fn advance(&mut self, side: Side) -> PlayerCard;

    /// The pitcher for the team in the field.
    fn pitcher(&self, fielding: Side) -> PlayerCard;

    /// Returns every pointer to the top of the order.
    fn rewind(&mut self);
}

/// Default batter names.
pub const DEFAULT_BATTERS: [&str; 9] = [
    "Mamoru Igari",
    "Akio Yabe",
    "Hijiri Rokudo",
    "Ryo Tomozawa",
    "Mizuki Tachibana",
    "Yasushi Abata",
    "Kojiro Tojo",
    "Hajime Saeki",
    "Goro Shigeno",
];

/// Default pitcher names.
pub const DEFAULT_PITCHERS: [&str; 5] = [
    "Aoi Hayakawa",
    "Susumu Igari",
    "Emilia Hijiri",
    "Nozomi Suzukaze",
    "Arashi Koba",
];

/// Fixed cyclic pool of names shared by both teams.
///
/// Numbers follow pool order. The pitcher is always the first pitcher name.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NamePool {
    batters: Vec<String>,
    pitchers: Vec<String>,
    index: usize,
}

impl NamePool {
    /// Creates a pool from name lists; empty lists fall back to the defaults.
    #[instrument(skip_all, fields(batters = batters.len(), pitchers = pitchers.len()))]
    pub fn new(batters: Vec<String>, pitchers: Vec<String>) -> Self {
        let batters = if batters.is_empty() {
            DEFAULT_BATTERS.iter().map(|s| s.to_string()).collect()
        } else {
            batters
        };
        let pitchers = if pitchers.is_empty() {
            DEFAULT_PITCHERS.iter().map(|s| s.to_string()).collect()
        } else {
            pitchers
        };
        Self {
            batters,
            pitchers,
            index: 0,
        }
    }

    fn card_at(&self, index: usize) -> PlayerCard {
        PlayerCard::new(&self.batters[index], index as u32 + 1, "Fielder")
    }
}

impl Default for NamePool {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl BattingRotation for NamePool {
    fn current_batter(&self, _side: Side) -> PlayerCard {
        self.card_at(self.index)
    }

    #[instrument(skip(self))]
    fn advance(&mut self, _side: Side) -> PlayerCard {
        self.index = (self.index + 1) % self.batters.len();
        debug!(index = self.index, "Next batter from pool");
        self.card_at(self.index)
    }

    fn pitcher(&self, _fielding: Side) -> PlayerCard {
        PlayerCard::new(&self.pitchers[0], 18, "Pitcher")
    }

    fn rewind(&mut self) {
        self.index = 0;
    }
}

/// One team's batting order and pitcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BattingOrder {
    slots: Vec<PlayerCard>,
    pitcher: PlayerCard,
    #[serde(skip)]
    #[getter(skip)]
    up: usize,
}

impl BattingOrder {
    /// Creates an order. Returns `None` unless exactly nine batters are given.
    #[instrument(skip_all, fields(slots = slots.len(), pitcher = %pitcher.name))]
    pub fn new(slots: Vec<PlayerCard>, pitcher: PlayerCard) -> Option<Self> {
        if slots.len() != LINEUP_SLOTS {
            warn!(slots = slots.len(), "Batting order must have nine slots");
            return None;
        }
        Some(Self { slots, pitcher, up: 0 })
    }

    /// Index of the batter due up (0-8).
    pub fn up(&self) -> usize {
        self.up
    }

    /// Puts `card` into `slot` without moving the pointer.
    ///
    /// Returns the replaced player, or `None` for an unknown slot.
    #[instrument(skip(self, card), fields(incoming = %card.name))]
    pub fn substitute(&mut self, slot: usize, card: PlayerCard) -> Option<PlayerCard> {
        let current = self.slots.get_mut(slot)?;
        let outgoing = std::mem::replace(current, card);
        info!(slot, outgoing = %outgoing.name, "Substitution");
        Some(outgoing)
    }

    /// Replaces the pitcher, returning the one removed.
    #[instrument(skip(self, card), fields(incoming = %card.name))]
    pub fn change_pitcher(&mut self, card: PlayerCard) -> PlayerCard {
        std::mem::replace(&mut self.pitcher, card)
    }

    fn current(&self) -> PlayerCard {
        self.slots[self.up].clone()
    }

    fn advance(&mut self) -> PlayerCard {
        self.up = (self.up + 1) % self.slots.len();
        self.current()
    }
}

/// Separate batting orders for both teams.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct LineupRotation {
    away: BattingOrder,
    home: BattingOrder,
}

impl LineupRotation {
    /// Creates a rotation from both orders.
    pub fn new(away: BattingOrder, home: BattingOrder) -> Self {
        Self { away, home }
    }

    /// Mutable access to one side's order, for substitutions.
    pub fn order_mut(&mut self, side: Side) -> &mut BattingOrder {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    fn order(&self, side: Side) -> &BattingOrder {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }
}

impl BattingRotation for LineupRotation {
    fn current_batter(&self, side: Side) -> PlayerCard {
        self.order(side).current()
    }

    #[instrument(skip(self))]
    fn advance(&mut self, side: Side) -> PlayerCard {
        let card = self.order_mut(side).advance();
        debug!(%side, up = self.order(side).up, batter = %card.name, "Next batter from lineup");
        card
    }

    fn pitcher(&self, fielding: Side) -> PlayerCard {
        self.order(fielding).pitcher.clone()
    }

    fn rewind(&mut self) {
        self.away.up = 0;
        self.home.up = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(prefix: &str) -> BattingOrder {
        let slots = (1..=9)
            .map(|n| PlayerCard::new(format!("{prefix}{n}"), n, "Fielder"))
            .collect();
        BattingOrder::new(slots, PlayerCard::new(format!("{prefix}P"), 1, "Pitcher")).unwrap()
    }

    #[test]
    fn test_pool_cycles() {
        let mut pool = NamePool::default();
        assert_eq!(pool.current_batter(Side::Away).name, DEFAULT_BATTERS[0]);
        for _ in 0..DEFAULT_BATTERS.len() - 1 {
            pool.advance(Side::Away);
        }
        assert_eq!(pool.advance(Side::Home).name, DEFAULT_BATTERS[0]);
    }

    #[test]
    fn test_order_requires_nine() {
        let short = vec![PlayerCard::new("A", 1, "C")];
        assert!(BattingOrder::new(short, PlayerCard::new("P", 1, "P")).is_none());
    }

    #[test]
    fn test_lineup_sides_are_independent() {
        let mut rotation = LineupRotation::new(order("a"), order("h"));
        assert_eq!(rotation.advance(Side::Away).name, "a2");
        assert_eq!(rotation.current_batter(Side::Home).name, "h1");
        assert_eq!(rotation.pitcher(Side::Home).name, "hP");
    }

    #[test]
    fn test_lineup_wraps_after_ninth() {
        let mut rotation = LineupRotation::new(order("a"), order("h"));
        for _ in 0..9 {
            rotation.advance(Side::Away);
        }
        assert_eq!(rotation.current_batter(Side::Away).name, "a1");
    }

    #[test]
    fn test_substitute_keeps_pointer() {
        let mut rotation = LineupRotation::new(order("a"), order("h"));
        rotation.advance(Side::Away);
        let outgoing = rotation
            .order_mut(Side::Away)
            .substitute(1, PlayerCard::new("pinch", 99, "PH"))
            .unwrap();
        assert_eq!(outgoing.name, "a2");
        assert_eq!(rotation.current_batter(Side::Away).name, "pinch");
    }
}
