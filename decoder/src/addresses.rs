//! The (emulator-agnostic) RAM address map this decoder reads from.
//!
//! The emulator is a pluggable back end (spec §6); the only contract it
//! owes us is "hand over 64 KiB of RAM bytes". The concrete offsets below
//! are this decoder's own fixed memory layout, documented once here so
//! every extraction function agrees on where things live.

pub const RAM_SIZE: usize = 65536;

pub const BATTLE_TYPE_ADDR: usize = 0xD000;
pub const TEXT_BOX_ID_ADDR: usize = 0xD001;
pub const JOY_IGNORE_ADDR: usize = 0xD002;
pub const FACING_ADDR: usize = 0xD003;
pub const MAP_ID_ADDR: usize = 0xD004;
pub const ENCOUNTER_RATE_ADDR: usize = 0xD005;

pub const MONEY_ADDR: usize = 0xD010; // 3 BCD bytes
pub const BADGE_ADDR: usize = 0xD013; // 1 bitfield byte
pub const PLAYTIME_ADDR: usize = 0xD014; // hours, minutes, seconds

pub const POKEDEX_OWNED_ADDR: usize = 0xD020; // 19 bytes
pub const POKEDEX_SEEN_ADDR: usize = 0xD033; // 19 bytes

pub const SPRITE_X_TABLE_ADDR: usize = 0xD050; // 16 bytes, entry 0 = player
pub const SPRITE_Y_TABLE_ADDR: usize = 0xD060; // 16 bytes, entry 0 = player

pub const WARP_COUNT_ADDR: usize = 0xD080;
pub const WARP_TABLE_ADDR: usize = 0xD081; // 3 bytes/entry: map_id, x, y

pub const PARTY_COUNT_ADDR: usize = 0xD100;
pub const PARTY_ADDR: usize = 0xD101; // 6 * POKEMON_STRUCT_SIZE

pub const ACTIVE_BATTLER_ADDR: usize = 0xD300;
pub const OPPONENT_ADDR: usize = 0xD32C;

pub const INVENTORY_COUNT_ADDR: usize = 0xD400;
pub const INVENTORY_ADDR: usize = 0xD401; // (id, qty) pairs, terminated by 0xFF

pub const TILEMAP_ADDR: usize = 0xC3A0; // 20 cols * 18 rows
pub const TILEMAP_COLS: usize = 20;
pub const TILEMAP_ROWS: usize = 18;

/// Byte layout of one Pokémon record, used for both party members and the
/// active-battler/opponent blocks.
pub const POKEMON_STRUCT_SIZE: usize = 44;

pub mod pokemon_offset {
    pub const SPECIES: usize = 0;
    pub const HP: usize = 1; // u16 BE
    pub const MAX_HP: usize = 3; // u16 BE
    pub const LEVEL: usize = 5;
    pub const STATUS: usize = 6;
    pub const TYPE1: usize = 7;
    pub const TYPE2: usize = 8; // 0xFF => single-typed
    pub const MOVES: usize = 9; // 4 bytes
    pub const MOVE_PP: usize = 13; // 4 bytes
    pub const MOVE_MAX_PP: usize = 17; // 4 bytes
    pub const STAT_MOD_ATTACK: usize = 21;
    pub const STAT_MOD_DEFENSE: usize = 22;
    pub const STAT_MOD_SPECIAL_ATTACK: usize = 23;
    pub const STAT_MOD_SPECIAL_DEFENSE: usize = 24;
    pub const STAT_MOD_SPEED: usize = 25;
    pub const STAT_MOD_ACCURACY: usize = 26;
    pub const STAT_MOD_EVASION: usize = 27;
}

pub const NO_SECOND_TYPE: u8 = 0xFF;

/// Battle-type byte: `0` no battle, `1` wild, `2` trainer.
pub mod battle_type {
    pub const NONE: u8 = 0;
    pub const WILD: u8 = 1;
    pub const TRAINER: u8 = 2;
}

/// Tilemap tile codes for dialogue/menu box borders and the cursor glyph.
pub mod tile {
    pub const BOX_TOP_LEFT: u8 = 0x60;
    pub const BOX_TOP_RIGHT: u8 = 0x61;
    pub const BOX_BOTTOM_LEFT: u8 = 0x62;
    pub const CURSOR: u8 = 0x6D;
}

/// Row at which a dialogue box's top-left border appears, if present.
pub const DIALOGUE_BOX_ROW: usize = 12;
/// First text row inside a dialogue box (rows 13..=16).
pub const DIALOGUE_TEXT_FIRST_ROW: usize = 13;
pub const DIALOGUE_TEXT_LAST_ROW: usize = 16;
pub const DIALOGUE_TEXT_FIRST_COL: usize = 1;
pub const DIALOGUE_TEXT_LAST_COL: usize = 18;
