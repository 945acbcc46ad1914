//! The game-state document (spec §3 "Game state document"). This is the
//! schema the decoder produces and the relay validates at its boundary
//! before caching/broadcasting it.

use crate::action::Action;
use serde::{Deserialize, Serialize};

/// Which branch of the game we're in, derived from RAM by the decoder's
/// phase-detection priority (battle > menu > dialogue > overworld).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Overworld,
    Battle,
    Menu,
    Dialogue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub money: u32,
    pub badges: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: u8,
    pub y: u8,
    pub map_id: u8,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Down,
    Up,
    Left,
    Right,
}

/// One learned move with its static Gen-1 table data plus current PP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveInstance {
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    pub power: u16,
    pub accuracy: u8,
    pub pp: u8,
    pub max_pp: u8,
    pub category: MoveCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
}

/// A status ailment decoded from the status byte (spec §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Healthy,
    Sleep,
    Freeze,
    Burn,
    Paralysis,
    Poison,
}

/// Stat boosts/drops in the user-facing `[-6, +6]` shape (raw byte minus 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StatModifiers {
    pub attack: i8,
    pub defense: i8,
    pub special_attack: i8,
    pub special_defense: i8,
    pub speed: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

/// A party member or battle participant. `hp <= max_hp`, `max_hp >= 1`,
/// `level` in `[1, 100]`, `types.len()` in `[1, 2]`, `moves.len() <= 4`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub species: String,
    pub nickname: Option<String>,
    pub level: u8,
    pub hp: u16,
    pub max_hp: u16,
    pub hp_percent: f32,
    pub types: Vec<String>,
    pub condition: Condition,
    pub moves: Vec<MoveInstance>,
    #[serde(default)]
    pub stat_modifiers: StatModifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    pub name: String,
    pub quantity: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub own: Pokemon,
    pub opponent: Pokemon,
    pub is_trainer_battle: bool,
    /// Effectiveness multiplier of each of `own`'s move slots against
    /// `opponent`'s primary type, in slot order (spec §4.6 type matrix).
    pub move_effectiveness: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverworldState {
    pub map_id: u8,
    pub encounter_rate_percent: f32,
    pub available_hms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuState {
    pub rows: Vec<String>,
    pub cursor_row: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub badge_count: u8,
    pub pokedex_seen: u16,
    pub pokedex_owned: u16,
    pub play_time_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnHistoryEntry {
    pub turn: u64,
    pub action: Action,
    pub phase: Phase,
}

/// The full document published to agents, capped and validated as described
/// in spec §3's invariants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub turn: u64,
    pub phase: Phase,
    pub seconds_remaining: u32,
    pub available_actions: Vec<Action>,
    pub player: Player,
    pub party: Vec<Pokemon>,
    pub inventory: Vec<ItemStack>,
    pub battle: Option<BattleState>,
    pub overworld: Option<OverworldState>,
    pub screen_text: Option<String>,
    pub menu_state: Option<MenuState>,
    pub progress: Progress,
    pub your_score: u64,
    pub your_rank: u32,
    pub total_agents: u32,
    pub streak: u32,
    pub tip: String,
    #[serde(default)]
    pub turn_history: Vec<TurnHistoryEntry>,
}

/// Maximum number of turn-history entries retained (spec §4.7 step 6).
pub const TURN_HISTORY_CAP: usize = 20;

/// A violated structural invariant from spec §3. The relay rejects any
/// document the decoder hands it that fails this check rather than ever
/// caching or broadcasting malformed state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateInvariantError {
    #[error("battle phase without battle payload, or vice versa")]
    BattlePhaseMismatch,
    #[error("party has {0} members, expected at most 6")]
    PartyTooLarge(usize),
    #[error("pokemon {species} has hp {hp} > max_hp {max_hp}, or max_hp == 0")]
    InvalidHp {
        species: String,
        hp: u16,
        max_hp: u16,
    },
    #[error("pokemon {species} has level {level}, expected 1..=100")]
    InvalidLevel { species: String, level: u8 },
    #[error("pokemon {species} has {0} types, expected 1 or 2", .count)]
    InvalidTypeCount { species: String, count: usize },
    #[error("pokemon {species} has {0} moves, expected at most 4", .count)]
    TooManyMoves { species: String, count: usize },
    #[error("available_actions has {0} entries, expected 8", .0)]
    WrongActionCount(usize),
    #[error("turn_history has {0} entries, expected at most {TURN_HISTORY_CAP}", .0)]
    TurnHistoryTooLong(usize),
}

impl GameState {
    /// Validates the structural invariants from spec §3. Called at the
    /// relay boundary before a decoded document is cached or broadcast.
    pub fn validate(&self) -> Result<(), StateInvariantError> {
        if (self.phase == Phase::Battle) != self.battle.is_some() {
            return Err(StateInvariantError::BattlePhaseMismatch);
        }
        if self.phase == Phase::Battle && self.overworld.is_some() {
            return Err(StateInvariantError::BattlePhaseMismatch);
        }
        if self.party.len() > 6 {
            return Err(StateInvariantError::PartyTooLarge(self.party.len()));
        }
        if self.available_actions.len() != Action::ALL.len() {
            return Err(StateInvariantError::WrongActionCount(
                self.available_actions.len(),
            ));
        }
        if self.turn_history.len() > TURN_HISTORY_CAP {
            return Err(StateInvariantError::TurnHistoryTooLong(
                self.turn_history.len(),
            ));
        }
        for mon in self.party.iter().chain(
            self.battle
                .iter()
                .flat_map(|b| [&b.own, &b.opponent].into_iter()),
        ) {
            validate_pokemon(mon)?;
        }
        Ok(())
    }
}

fn validate_pokemon(mon: &Pokemon) -> Result<(), StateInvariantError> {
    if mon.max_hp == 0 || mon.hp > mon.max_hp {
        return Err(StateInvariantError::InvalidHp {
            species: mon.species.clone(),
            hp: mon.hp,
            max_hp: mon.max_hp,
        });
    }
    if mon.level < 1 || mon.level > 100 {
        return Err(StateInvariantError::InvalidLevel {
            species: mon.species.clone(),
            level: mon.level,
        });
    }
    if mon.types.is_empty() || mon.types.len() > 2 {
        return Err(StateInvariantError::InvalidTypeCount {
            species: mon.species.clone(),
            count: mon.types.len(),
        });
    }
    if mon.moves.len() > 4 {
        return Err(StateInvariantError::TooManyMoves {
            species: mon.species.clone(),
            count: mon.moves.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pokemon() -> Pokemon {
        Pokemon {
            species: "Pikachu".into(),
            nickname: None,
            level: 10,
            hp: 30,
            max_hp: 30,
            hp_percent: 100.0,
            types: vec!["Electric".into()],
            condition: Condition::Healthy,
            moves: vec![],
            stat_modifiers: StatModifiers::default(),
        }
    }

    fn sample_state() -> GameState {
        GameState {
            turn: 0,
            phase: Phase::Overworld,
            seconds_remaining: 15,
            available_actions: Action::ALL.to_vec(),
            player: Player {
                name: "Red".into(),
                position: Position {
                    x: 0,
                    y: 0,
                    map_id: 0,
                    direction: Direction::Down,
                },
                money: 0,
                badges: vec![],
            },
            party: vec![sample_pokemon()],
            inventory: vec![],
            battle: None,
            overworld: Some(OverworldState {
                map_id: 0,
                encounter_rate_percent: 0.0,
                available_hms: vec![],
            }),
            screen_text: None,
            menu_state: None,
            progress: Progress::default(),
            your_score: 0,
            your_rank: 0,
            total_agents: 0,
            streak: 0,
            tip: "tip".into(),
            turn_history: vec![],
        }
    }

    #[test]
    fn valid_overworld_state_passes() {
        assert!(sample_state().validate().is_ok());
    }

    #[test]
    fn battle_phase_requires_battle_payload() {
        let mut state = sample_state();
        state.phase = Phase::Battle;
        assert_eq!(
            state.validate(),
            Err(StateInvariantError::BattlePhaseMismatch)
        );
    }

    #[test]
    fn party_over_six_is_rejected() {
        let mut state = sample_state();
        state.party = std::iter::repeat_with(sample_pokemon).take(7).collect();
        assert!(matches!(
            state.validate(),
            Err(StateInvariantError::PartyTooLarge(7))
        ));
    }

    #[test]
    fn zero_max_hp_is_rejected() {
        let mut state = sample_state();
        state.party[0].max_hp = 0;
        assert!(matches!(
            state.validate(),
            Err(StateInvariantError::InvalidHp { .. })
        ));
    }
}
