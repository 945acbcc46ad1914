//! Pure RAM-to-game-state decoding (spec §4.6). `decode` takes a snapshot of
//! 64 KiB of emulator RAM plus a few out-of-band numbers (turn, tick
//! deadline, scoreboard figures) and returns a fully-formed [`GameState`].
//!
//! There is no I/O here, no randomness, and nothing that can fail short of
//! a panic on a malformed invariant the caller is expected never to hit —
//! every extraction function degrades gracefully on short/garbage RAM
//! rather than throwing, matching spec §7's "decoder never errors" rule.

pub mod addresses;
pub mod tables;
pub mod tables_data;

use addresses::*;
use protocol::state::{
    BattleState, Condition, Direction, GameState, ItemStack, MenuState, MoveInstance,
    OverworldState, Phase, Player, Position, Pokemon, Progress, StatModifiers, TurnHistoryEntry,
};
use protocol::Action;
use tables::{decode_status, effectiveness, move_info, species_name, type_name, StatusBits};

/// Scoreboard figures the decoder has no way to compute itself; the tick
/// processor supplies them from the store (spec §4.7 step 4).
#[derive(Debug, Clone, Copy)]
pub struct ScoreboardInputs {
    pub your_score: u64,
    pub your_rank: u32,
    pub total_agents: u32,
    pub streak: u32,
}

/// Decodes a full [`GameState`] document from a 64 KiB RAM snapshot.
///
/// `turn` and `seconds_remaining` are out-of-band (the tick processor's own
/// bookkeeping); `turn_history` is threaded through unchanged (the caller
/// appends the new entry and caps it, per spec §4.7 step 6) so this function
/// stays a pure, single-purpose transform of RAM plus scoreboard context.
pub fn decode(
    ram: &[u8],
    turn: u64,
    seconds_remaining: u32,
    turn_history: Vec<TurnHistoryEntry>,
    scoreboard: ScoreboardInputs,
) -> GameState {
    let phase = detect_phase(ram);

    let battle = (phase == Phase::Battle).then(|| decode_battle(ram));
    let overworld = (phase != Phase::Battle).then(|| decode_overworld(ram));
    let screen_text = (phase == Phase::Dialogue).then(|| decode_screen_text(ram)).flatten();
    let menu_state = (phase == Phase::Menu).then(|| decode_menu(ram)).flatten();

    let player = decode_player(ram);
    let party = decode_party(ram);
    let inventory = decode_inventory(ram);
    let progress = decode_progress(ram);

    let tip = generate_tip(phase, battle.as_ref(), overworld.as_ref());

    GameState {
        turn,
        phase,
        seconds_remaining,
        available_actions: Action::ALL.to_vec(),
        player,
        party,
        inventory,
        battle,
        overworld,
        screen_text,
        menu_state,
        progress,
        your_score: scoreboard.your_score,
        your_rank: scoreboard.your_rank,
        total_agents: scoreboard.total_agents,
        streak: scoreboard.streak,
        tip,
        turn_history,
    }
}

fn byte(ram: &[u8], addr: usize) -> u8 {
    ram.get(addr).copied().unwrap_or(0)
}

fn u16_be(ram: &[u8], addr: usize) -> u16 {
    (byte(ram, addr) as u16) << 8 | byte(ram, addr + 1) as u16
}

/// Phase priority from spec §4.6: battle > menu > dialogue > overworld.
///
/// Exposed so callers that only need the phase (e.g. the phase watchdog)
/// can skip the cost of a full [`decode`].
pub fn detect_phase(ram: &[u8]) -> Phase {
    if byte(ram, BATTLE_TYPE_ADDR) != battle_type::NONE {
        Phase::Battle
    } else if find_menu_box(ram).is_some() {
        Phase::Menu
    } else if byte(ram, TEXT_BOX_ID_ADDR) != 0 || byte(ram, JOY_IGNORE_ADDR) != 0 {
        Phase::Dialogue
    } else {
        Phase::Overworld
    }
}

fn decode_direction(facing: u8) -> Direction {
    match facing & 0x0C {
        0x00 => Direction::Down,
        0x04 => Direction::Up,
        0x08 => Direction::Left,
        _ => Direction::Right,
    }
}

fn decode_condition(status_byte: u8) -> Condition {
    match decode_status(status_byte) {
        StatusBits::Healthy => Condition::Healthy,
        StatusBits::Sleep => Condition::Sleep,
        StatusBits::Freeze => Condition::Freeze,
        StatusBits::Burn => Condition::Burn,
        StatusBits::Paralysis => Condition::Paralysis,
        StatusBits::Poison => Condition::Poison,
    }
}

fn decode_stat_modifiers(ram: &[u8], base: usize) -> StatModifiers {
    // Raw bytes are stored 0..=13 where 7 is neutral; the document exposes
    // the user-facing [-6, +6] range.
    let raw = |offset: usize| byte(ram, base + offset) as i16 - 7;
    StatModifiers {
        attack: raw(pokemon_offset::STAT_MOD_ATTACK) as i8,
        defense: raw(pokemon_offset::STAT_MOD_DEFENSE) as i8,
        special_attack: raw(pokemon_offset::STAT_MOD_SPECIAL_ATTACK) as i8,
        special_defense: raw(pokemon_offset::STAT_MOD_SPECIAL_DEFENSE) as i8,
        speed: raw(pokemon_offset::STAT_MOD_SPEED) as i8,
        accuracy: raw(pokemon_offset::STAT_MOD_ACCURACY) as i8,
        evasion: raw(pokemon_offset::STAT_MOD_EVASION) as i8,
    }
}

/// Decodes one 44-byte Pokémon record at `base`. `max_hp` and `level` never
/// read back as 0: uninitialised RAM falls back to 1, matching spec §4.6's
/// "stats fall back to 1, never 0" invariant.
fn decode_pokemon_at(ram: &[u8], base: usize) -> Pokemon {
    let species_code = byte(ram, base + pokemon_offset::SPECIES);
    let hp = u16_be(ram, base + pokemon_offset::HP);
    let max_hp = u16_be(ram, base + pokemon_offset::MAX_HP).max(1);
    let hp = hp.min(max_hp);
    let level = byte(ram, base + pokemon_offset::LEVEL).max(1);

    let type1 = byte(ram, base + pokemon_offset::TYPE1);
    let type2 = byte(ram, base + pokemon_offset::TYPE2);
    let mut types = Vec::with_capacity(2);
    if let Some(name) = type_name(type1) {
        types.push(name.to_string());
    }
    if type2 != NO_SECOND_TYPE && type2 != type1 {
        if let Some(name) = type_name(type2) {
            types.push(name.to_string());
        }
    }
    if types.is_empty() {
        types.push(type_name(0).unwrap_or("Normal").to_string());
    }

    let moves = (0..4)
        .filter_map(|slot| {
            let move_id = byte(ram, base + pokemon_offset::MOVES + slot);
            if move_id == 0 {
                return None;
            }
            let pp = byte(ram, base + pokemon_offset::MOVE_PP + slot);
            let max_pp = byte(ram, base + pokemon_offset::MOVE_MAX_PP + slot).max(pp);
            let info = move_info(move_id);
            Some(MoveInstance {
                name: info.name.to_string(),
                move_type: info.move_type.to_string(),
                power: info.power,
                accuracy: info.accuracy,
                pp,
                max_pp,
                category: info.category,
            })
        })
        .collect();

    Pokemon {
        species: species_name(species_code).to_string(),
        nickname: None,
        level,
        hp,
        max_hp,
        hp_percent: round_tenth(hp as f32 / max_hp as f32 * 100.0),
        types,
        condition: decode_condition(byte(ram, base + pokemon_offset::STATUS)),
        moves,
        stat_modifiers: decode_stat_modifiers(ram, base),
    }
}

fn round_tenth(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

fn decode_party(ram: &[u8]) -> Vec<Pokemon> {
    let count = byte(ram, PARTY_COUNT_ADDR).min(6) as usize;
    (0..count)
        .map(|i| decode_pokemon_at(ram, PARTY_ADDR + i * POKEMON_STRUCT_SIZE))
        .collect()
}

fn decode_battle(ram: &[u8]) -> BattleState {
    let own = decode_pokemon_at(ram, ACTIVE_BATTLER_ADDR);
    let opponent = decode_pokemon_at(ram, OPPONENT_ADDR);

    let defender_types: Vec<&str> = opponent.types.iter().map(String::as_str).collect();
    let move_effectiveness = own
        .moves
        .iter()
        .map(|m| effectiveness(&m.move_type, &defender_types))
        .collect();

    BattleState {
        own,
        opponent,
        is_trainer_battle: byte(ram, BATTLE_TYPE_ADDR) == battle_type::TRAINER,
        move_effectiveness,
    }
}

fn decode_inventory(ram: &[u8]) -> Vec<ItemStack> {
    let count = byte(ram, INVENTORY_COUNT_ADDR) as usize;
    let mut items = Vec::new();
    for i in 0..count.min(20) {
        let addr = INVENTORY_ADDR + i * 2;
        let id = byte(ram, addr);
        if id == 0xFF {
            break;
        }
        let qty = byte(ram, addr + 1);
        items.push(ItemStack {
            name: item_name(id),
            quantity: qty as u16,
        });
    }
    items
}

/// Items aren't in the move/species tables; a minimal label is enough for
/// the document's purposes (spec §4.6 doesn't require a full item table).
fn item_name(id: u8) -> String {
    format!("Item#{id}")
}

fn decode_money(ram: &[u8]) -> u32 {
    let bcd = |b: u8| ((b >> 4) * 10 + (b & 0x0F)) as u32;
    let hi = bcd(byte(ram, MONEY_ADDR));
    let mid = bcd(byte(ram, MONEY_ADDR + 1));
    let lo = bcd(byte(ram, MONEY_ADDR + 2));
    hi * 10_000 + mid * 100 + lo
}

const BADGE_NAMES: [&str; 8] = [
    "Boulder", "Cascade", "Thunder", "Rainbow", "Soul", "Marsh", "Volcano", "Earth",
];

fn decode_badges(ram: &[u8]) -> Vec<String> {
    let bits = byte(ram, BADGE_ADDR);
    BADGE_NAMES
        .iter()
        .enumerate()
        .filter(|(i, _)| bits & (1 << i) != 0)
        .map(|(_, name)| name.to_string())
        .collect()
}

fn decode_player(ram: &[u8]) -> Player {
    Player {
        name: "Red".to_string(),
        position: Position {
            x: byte(ram, SPRITE_X_TABLE_ADDR),
            y: byte(ram, SPRITE_Y_TABLE_ADDR),
            map_id: byte(ram, MAP_ID_ADDR),
            direction: decode_direction(byte(ram, FACING_ADDR)),
        },
        money: decode_money(ram),
        badges: decode_badges(ram),
    }
}

fn count_set_bits(ram: &[u8], addr: usize, len: usize) -> u16 {
    ram.get(addr..addr + len)
        .map(|bytes| bytes.iter().map(|b| b.count_ones() as u16).sum())
        .unwrap_or(0)
}

fn decode_progress(ram: &[u8]) -> Progress {
    Progress {
        badge_count: decode_badges(ram).len() as u8,
        pokedex_seen: count_set_bits(ram, POKEDEX_SEEN_ADDR, 19),
        pokedex_owned: count_set_bits(ram, POKEDEX_OWNED_ADDR, 19),
        play_time_seconds: byte(ram, PLAYTIME_ADDR) as u32 * 3600
            + byte(ram, PLAYTIME_ADDR + 1) as u32 * 60
            + byte(ram, PLAYTIME_ADDR + 2) as u32,
    }
}

/// Moves that, if owned, unlock overworld traversal options worth telling
/// the agents about (spec §4.6 tip generation).
const HM_MOVE_IDS: [(u8, &str); 5] = [(15, "Cut"), (19, "Fly"), (57, "Surf"), (70, "Strength"), (148, "Flash")];

fn available_hms(ram: &[u8]) -> Vec<String> {
    let count = byte(ram, PARTY_COUNT_ADDR).min(6) as usize;
    let mut hms = Vec::new();
    for i in 0..count {
        let base = PARTY_ADDR + i * POKEMON_STRUCT_SIZE;
        for slot in 0..4 {
            let move_id = byte(ram, base + pokemon_offset::MOVES + slot);
            for (hm_id, hm_name) in HM_MOVE_IDS {
                if move_id == hm_id && !hms.iter().any(|h| h == hm_name) {
                    hms.push(hm_name.to_string());
                }
            }
        }
    }
    hms
}

fn decode_overworld(ram: &[u8]) -> OverworldState {
    OverworldState {
        map_id: byte(ram, MAP_ID_ADDR),
        encounter_rate_percent: round_tenth(byte(ram, ENCOUNTER_RATE_ADDR) as f32 / 255.0 * 100.0),
        available_hms: available_hms(ram),
    }
}

/// Game Boy text codes map uppercase letters starting at 0x80 and digits
/// starting at 0xF6; anything else renders as a space rather than failing.
fn text_code_to_char(code: u8) -> char {
    match code {
        0x80..=0x99 => (b'A' + (code - 0x80)) as char,
        0xA0..=0xB9 => (b'a' + (code - 0xA0)) as char,
        0xF6..=0xFF => (b'0' + (code - 0xF6)) as char,
        0x7F => ' ',
        tile::CURSOR => '>',
        _ => ' ',
    }
}

/// Walks the 20x18 tilemap from [`DIALOGUE_TEXT_FIRST_ROW`] to
/// [`DIALOGUE_TEXT_LAST_ROW`], joining each row's decoded glyphs and
/// trimming trailing padding. Returns `None` if no dialogue box is present.
fn decode_screen_text(ram: &[u8]) -> Option<String> {
    if byte(ram, TEXT_BOX_ID_ADDR) == 0 && byte(ram, JOY_IGNORE_ADDR) == 0 {
        return None;
    }
    let mut lines = Vec::new();
    for row in DIALOGUE_TEXT_FIRST_ROW..=DIALOGUE_TEXT_LAST_ROW {
        let mut line = String::new();
        for col in DIALOGUE_TEXT_FIRST_COL..=DIALOGUE_TEXT_LAST_COL {
            let addr = TILEMAP_ADDR + row * TILEMAP_COLS + col;
            line.push(text_code_to_char(byte(ram, addr)));
        }
        let trimmed = line.trim_end().to_string();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

/// Locates a menu box by its top-left/top-right/bottom-left border tiles,
/// returning the box's (top row, left col, right col, bottom row).
fn find_menu_box(ram: &[u8]) -> Option<(usize, usize, usize, usize)> {
    for row in 0..TILEMAP_ROWS {
        for col in 0..TILEMAP_COLS {
            let addr = TILEMAP_ADDR + row * TILEMAP_COLS + col;
            if byte(ram, addr) != tile::BOX_TOP_LEFT {
                continue;
            }
            let mut right = col;
            while right + 1 < TILEMAP_COLS
                && byte(ram, TILEMAP_ADDR + row * TILEMAP_COLS + right + 1) != tile::BOX_TOP_RIGHT
            {
                right += 1;
            }
            if right + 1 >= TILEMAP_COLS {
                continue;
            }
            right += 1;
            let mut bottom = row;
            while bottom + 1 < TILEMAP_ROWS
                && byte(ram, TILEMAP_ADDR + (bottom + 1) * TILEMAP_COLS + col) != tile::BOX_BOTTOM_LEFT
            {
                bottom += 1;
            }
            if bottom + 1 >= TILEMAP_ROWS {
                continue;
            }
            bottom += 1;
            return Some((row, col, right, bottom));
        }
    }
    None
}

fn decode_menu(ram: &[u8]) -> Option<MenuState> {
    let (top, left, right, bottom) = find_menu_box(ram)?;
    let mut rows = Vec::new();
    let mut cursor_row = 0usize;
    for (i, row) in (top + 1..bottom).enumerate() {
        let mut line = String::new();
        let mut has_cursor = false;
        for col in left + 1..right {
            let addr = TILEMAP_ADDR + row * TILEMAP_COLS + col;
            let code = byte(ram, addr);
            if code == tile::CURSOR {
                has_cursor = true;
            }
            line.push(text_code_to_char(code));
        }
        if has_cursor {
            cursor_row = i;
        }
        let trimmed = line.trim_end().to_string();
        if !trimmed.is_empty() {
            rows.push(trimmed);
        }
    }
    Some(MenuState { rows, cursor_row })
}

/// Tip priority from spec §4.6: in battle, a super-effective move beats a
/// low-HP switch warning beats a generic line; in the overworld, newly
/// available HMs beat a high-encounter-rate warning beats a generic line.
fn generate_tip(phase: Phase, battle: Option<&BattleState>, overworld: Option<&OverworldState>) -> String {
    match phase {
        Phase::Battle => {
            let battle = battle.expect("battle phase always carries a battle payload");
            if let Some((slot, mult)) = battle
                .move_effectiveness
                .iter()
                .enumerate()
                .filter(|(_, m)| **m > 1.0)
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            {
                let move_name = &battle.own.moves[slot].name;
                return format!("{move_name} is super effective against {}! ({mult}x)", battle.opponent.species);
            }
            if battle.own.hp_percent < 25.0 {
                return format!("{} is critically low on HP — consider switching.", battle.own.species);
            }
            format!("Battling {}. Choose wisely.", battle.opponent.species)
        }
        Phase::Overworld => {
            let overworld = overworld.expect("overworld phase always carries an overworld payload");
            if !overworld.available_hms.is_empty() {
                return format!("You can use {} to reach new areas.", overworld.available_hms.join(", "));
            }
            if overworld.encounter_rate_percent > 20.0 {
                return "High wild encounter rate here — watch your HP.".to_string();
            }
            "Explore the map to find new Pokémon and items.".to_string()
        }
        Phase::Menu => "Navigate the menu with up/down and confirm your choice.".to_string(),
        Phase::Dialogue => "Read the dialogue and press A to continue.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_ram() -> Vec<u8> {
        vec![0u8; RAM_SIZE]
    }

    fn write_pokemon(
        ram: &mut [u8],
        base: usize,
        species: u8,
        hp: u16,
        max_hp: u16,
        level: u8,
        type1: u8,
        type2: u8,
        moves: [u8; 4],
    ) {
        ram[base + pokemon_offset::SPECIES] = species;
        ram[base + pokemon_offset::HP] = (hp >> 8) as u8;
        ram[base + pokemon_offset::HP + 1] = hp as u8;
        ram[base + pokemon_offset::MAX_HP] = (max_hp >> 8) as u8;
        ram[base + pokemon_offset::MAX_HP + 1] = max_hp as u8;
        ram[base + pokemon_offset::LEVEL] = level;
        ram[base + pokemon_offset::TYPE1] = type1;
        ram[base + pokemon_offset::TYPE2] = type2;
        for (i, m) in moves.iter().enumerate() {
            ram[base + pokemon_offset::MOVES + i] = *m;
            ram[base + pokemon_offset::MOVE_PP + i] = 10;
            ram[base + pokemon_offset::MOVE_MAX_PP + i] = 10;
        }
        for off in [
            pokemon_offset::STAT_MOD_ATTACK,
            pokemon_offset::STAT_MOD_DEFENSE,
            pokemon_offset::STAT_MOD_SPECIAL_ATTACK,
            pokemon_offset::STAT_MOD_SPECIAL_DEFENSE,
            pokemon_offset::STAT_MOD_SPEED,
            pokemon_offset::STAT_MOD_ACCURACY,
            pokemon_offset::STAT_MOD_EVASION,
        ] {
            ram[base + off] = 7;
        }
    }

    fn sample_scoreboard() -> ScoreboardInputs {
        ScoreboardInputs {
            your_score: 10,
            your_rank: 1,
            total_agents: 5,
            streak: 2,
        }
    }

    /// spec §8 scenario S1: a battle against a Venusaur opponent where the
    /// own Pokémon's move is super effective, and hp_percent rounds to the
    /// documented 44.4%.
    #[test]
    fn s1_battle_scenario_matches_spec() {
        let mut ram = empty_ram();
        ram[BATTLE_TYPE_ADDR] = battle_type::WILD;
        // Charmander (Fire) with Ember (move id 52, Fire) vs Venusaur (Grass/Poison).
        write_pokemon(&mut ram, ACTIVE_BATTLER_ADDR, 4, 20, 45, 12, 8, NO_SECOND_TYPE, [52, 0, 0, 0]);
        write_pokemon(&mut ram, OPPONENT_ADDR, 3, 40, 80, 15, 10, 3, [0, 0, 0, 0]);

        let state = decode(&ram, 1, 15, vec![], sample_scoreboard());

        assert_eq!(state.phase, Phase::Battle);
        let battle = state.battle.expect("battle payload present");
        assert_eq!(battle.opponent.species, "Venusaur");
        assert!((battle.own.hp_percent - 44.4).abs() < 0.05);
        assert!(battle.move_effectiveness[0] > 1.0);
        assert!(state.tip.contains("super effective"));
    }

    /// spec §8 scenario S2: a dialogue box renders the tilemap's text rows
    /// as a joined string and phase detection prefers dialogue over
    /// overworld when the text-box id is set.
    #[test]
    fn s2_dialogue_scenario_matches_spec() {
        let mut ram = empty_ram();
        ram[TEXT_BOX_ID_ADDR] = 1;
        let row = DIALOGUE_TEXT_FIRST_ROW;
        let text = "HI";
        for (i, ch) in text.chars().enumerate() {
            let code = 0x80 + (ch as u8 - b'A');
            ram[TILEMAP_ADDR + row * TILEMAP_COLS + DIALOGUE_TEXT_FIRST_COL + i] = code;
        }

        let state = decode(&ram, 2, 15, vec![], sample_scoreboard());

        assert_eq!(state.phase, Phase::Dialogue);
        assert_eq!(state.screen_text.as_deref(), Some("HI"));
    }

    #[test]
    fn phase_priority_prefers_battle_over_dialogue() {
        let mut ram = empty_ram();
        ram[BATTLE_TYPE_ADDR] = battle_type::WILD;
        ram[TEXT_BOX_ID_ADDR] = 1;
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        assert_eq!(state.phase, Phase::Battle);
    }

    #[test]
    fn all_zero_ram_decodes_to_valid_overworld_state() {
        let ram = empty_ram();
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        assert_eq!(state.phase, Phase::Overworld);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn party_count_is_capped_at_six() {
        let mut ram = empty_ram();
        ram[PARTY_COUNT_ADDR] = 200;
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        assert!(state.party.len() <= 6);
    }

    #[test]
    fn stat_modifiers_decode_zero_offset_as_neutral() {
        let mut ram = empty_ram();
        write_pokemon(&mut ram, ACTIVE_BATTLER_ADDR, 25, 10, 10, 5, 11, NO_SECOND_TYPE, [0, 0, 0, 0]);
        ram[BATTLE_TYPE_ADDR] = battle_type::WILD;
        write_pokemon(&mut ram, OPPONENT_ADDR, 1, 10, 10, 5, 10, NO_SECOND_TYPE, [0, 0, 0, 0]);
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        let battle = state.battle.unwrap();
        assert_eq!(battle.own.stat_modifiers.attack, 0);
    }

    #[test]
    fn badges_decode_from_bitfield() {
        let mut ram = empty_ram();
        ram[BADGE_ADDR] = 0b0000_0011;
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        assert_eq!(state.player.badges, vec!["Boulder", "Cascade"]);
        assert_eq!(state.progress.badge_count, 2);
    }

    #[test]
    fn money_decodes_from_bcd() {
        let mut ram = empty_ram();
        ram[MONEY_ADDR] = 0x01;
        ram[MONEY_ADDR + 1] = 0x23;
        ram[MONEY_ADDR + 2] = 0x45;
        let state = decode(&ram, 0, 15, vec![], sample_scoreboard());
        assert_eq!(state.player.money, 12345);
    }
}
