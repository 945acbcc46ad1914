//! Literal decoding tables for Gen-1 data (spec §4.6). Generated once from
//! canonical Red/Blue data and committed as plain Rust arrays — there is no
//! runtime parsing step, so a malformed table would be a compile-time typo.

/// The 15 Gen-1 types, indexed by type code 0..=14.
pub const TYPES: [&str; 15] = [
    "Normal", "Fighting", "Flying", "Poison", "Ground", "Rock", "Bug", "Ghost", "Fire", "Water", "Grass", "Electric", "Psychic", "Ice", "Dragon",
];

/// Types whose damage is calculated as Special in Gen 1 (category follows the
/// move's type, not the individual move).
pub const SPECIAL_TYPES: [&str; 7] = [
    "Dragon", "Electric", "Fire", "Grass", "Ice", "Psychic", "Water",
];

/// Species code (1-based, matching the internal Pokedex index) to name,
/// covering all 151 original species. Index 0 is unused (`"-"`).
pub const SPECIES: [&str; 152] = [
    "-",
    "Bulbasaur", "Ivysaur", "Venusaur", "Charmander", "Charmeleon", "Charizard",
    "Squirtle", "Wartortle", "Blastoise", "Caterpie", "Metapod", "Butterfree",
    "Weedle", "Kakuna", "Beedrill", "Pidgey", "Pidgeotto", "Pidgeot",
    "Rattata", "Raticate", "Spearow", "Fearow", "Ekans", "Arbok",
    "Pikachu", "Raichu", "Sandshrew", "Sandslash", "Nidoran-F", "Nidorina",
    "Nidoqueen", "Nidoran-M", "Nidorino", "Nidoking", "Clefairy", "Clefable",
    "Vulpix", "Ninetales", "Jigglypuff", "Wigglytuff", "Zubat", "Golbat",
    "Oddish", "Gloom", "Vileplume", "Paras", "Parasect", "Venonat",
    "Venomoth", "Diglett", "Dugtrio", "Meowth", "Persian", "Psyduck",
    "Golduck", "Mankey", "Primeape", "Growlithe", "Arcanine", "Poliwag",
    "Poliwhirl", "Poliwrath", "Abra", "Kadabra", "Alakazam", "Machop",
    "Machoke", "Machamp", "Bellsprout", "Weepinbell", "Victreebel", "Tentacool",
    "Tentacruel", "Geodude", "Graveler", "Golem", "Ponyta", "Rapidash",
    "Slowpoke", "Slowbro", "Magnemite", "Magneton", "Farfetchd", "Doduo",
    "Dodrio", "Seel", "Dewgong", "Grimer", "Muk", "Shellder",
    "Cloyster", "Gastly", "Haunter", "Gengar", "Onix", "Drowzee",
    "Hypno", "Krabby", "Kingler", "Voltorb", "Electrode", "Exeggcute",
    "Exeggutor", "Cubone", "Marowak", "Hitmonlee", "Hitmonchan", "Lickitung",
    "Koffing", "Weezing", "Rhyhorn", "Rhydon", "Chansey", "Tangela",
    "Kangaskhan", "Horsea", "Seadra", "Goldeen", "Seaking", "Staryu",
    "Starmie", "MrMime", "Scyther", "Jynx", "Electabuzz", "Magmar",
    "Pinsir", "Tauros", "Magikarp", "Gyarados", "Lapras", "Ditto",
    "Eevee", "Vaporeon", "Jolteon", "Flareon", "Porygon", "Omanyte",
    "Omastar", "Kabuto", "Kabutops", "Aerodactyl", "Snorlax", "Articuno",
    "Zapdos", "Moltres", "Dratini", "Dragonair", "Dragonite", "Mewtwo",
    "Mew",
];

/// One row of the Gen-1 move table: `(name, type, power, accuracy, base_pp)`.
/// Damage category is derived from `type` via [`SPECIAL_TYPES`], matching how
/// Generation 1 actually assigns physical/special (per type, not per move).
pub struct MoveRow {
    pub name: &'static str,
    pub move_type: &'static str,
    pub power: u16,
    pub accuracy: u8,
    pub base_pp: u8,
}

/// Move id (1-based) to its row. Index 0 is unused/absent in RAM.
pub const MOVES: [MoveRow; 166] = [
    MoveRow { name: "-", move_type: "Normal", power: 0, accuracy: 0, base_pp: 0 },
    MoveRow { name: "Pound", move_type: "Normal", power: 40, accuracy: 100, base_pp: 35 },
    MoveRow { name: "KarateChop", move_type: "Fighting", power: 50, accuracy: 100, base_pp: 25 },
    MoveRow { name: "DoubleSlap", move_type: "Normal", power: 15, accuracy: 85, base_pp: 10 },
    MoveRow { name: "CometPunch", move_type: "Normal", power: 18, accuracy: 85, base_pp: 15 },
    MoveRow { name: "MegaPunch", move_type: "Normal", power: 80, accuracy: 85, base_pp: 20 },
    MoveRow { name: "PayDay", move_type: "Normal", power: 40, accuracy: 100, base_pp: 20 },
    MoveRow { name: "FirePunch", move_type: "Fire", power: 75, accuracy: 100, base_pp: 15 },
    MoveRow { name: "IcePunch", move_type: "Ice", power: 75, accuracy: 100, base_pp: 15 },
    MoveRow { name: "ThunderPunch", move_type: "Electric", power: 75, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Scratch", move_type: "Normal", power: 40, accuracy: 100, base_pp: 35 },
    MoveRow { name: "ViceGrip", move_type: "Normal", power: 55, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Guillotine", move_type: "Normal", power: 0, accuracy: 30, base_pp: 5 },
    MoveRow { name: "RazorWind", move_type: "Normal", power: 80, accuracy: 75, base_pp: 10 },
    MoveRow { name: "SwordsDance", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Cut", move_type: "Normal", power: 50, accuracy: 95, base_pp: 30 },
    MoveRow { name: "Gust", move_type: "Normal", power: 40, accuracy: 100, base_pp: 35 },
    MoveRow { name: "WingAttack", move_type: "Flying", power: 35, accuracy: 100, base_pp: 35 },
    MoveRow { name: "Whirlwind", move_type: "Normal", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Fly", move_type: "Flying", power: 70, accuracy: 95, base_pp: 15 },
    MoveRow { name: "Bind", move_type: "Normal", power: 15, accuracy: 85, base_pp: 20 },
    MoveRow { name: "Slam", move_type: "Normal", power: 80, accuracy: 75, base_pp: 20 },
    MoveRow { name: "VineWhip", move_type: "Grass", power: 35, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Stomp", move_type: "Normal", power: 65, accuracy: 100, base_pp: 20 },
    MoveRow { name: "DoubleKick", move_type: "Fighting", power: 30, accuracy: 100, base_pp: 30 },
    MoveRow { name: "MegaKick", move_type: "Normal", power: 120, accuracy: 75, base_pp: 5 },
    MoveRow { name: "JumpKick", move_type: "Fighting", power: 70, accuracy: 95, base_pp: 25 },
    MoveRow { name: "RollingKick", move_type: "Fighting", power: 60, accuracy: 85, base_pp: 15 },
    MoveRow { name: "SandAttack", move_type: "Normal", power: 0, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Headbutt", move_type: "Normal", power: 70, accuracy: 100, base_pp: 15 },
    MoveRow { name: "HornAttack", move_type: "Normal", power: 65, accuracy: 100, base_pp: 25 },
    MoveRow { name: "FuryAttack", move_type: "Normal", power: 15, accuracy: 85, base_pp: 20 },
    MoveRow { name: "HornDrill", move_type: "Normal", power: 0, accuracy: 30, base_pp: 5 },
    MoveRow { name: "Tackle", move_type: "Normal", power: 35, accuracy: 95, base_pp: 35 },
    MoveRow { name: "BodySlam", move_type: "Normal", power: 85, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Wrap", move_type: "Normal", power: 15, accuracy: 85, base_pp: 20 },
    MoveRow { name: "TakeDown", move_type: "Normal", power: 90, accuracy: 85, base_pp: 20 },
    MoveRow { name: "Thrash", move_type: "Normal", power: 90, accuracy: 100, base_pp: 20 },
    MoveRow { name: "DoubleEdge", move_type: "Normal", power: 100, accuracy: 100, base_pp: 15 },
    MoveRow { name: "TailWhip", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "PoisonSting", move_type: "Poison", power: 15, accuracy: 100, base_pp: 35 },
    MoveRow { name: "Twineedle", move_type: "Bug", power: 25, accuracy: 100, base_pp: 20 },
    MoveRow { name: "PinMissile", move_type: "Bug", power: 14, accuracy: 85, base_pp: 20 },
    MoveRow { name: "Leer", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Bite", move_type: "Normal", power: 60, accuracy: 100, base_pp: 25 },
    MoveRow { name: "Growl", move_type: "Normal", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "Roar", move_type: "Normal", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Sing", move_type: "Normal", power: 0, accuracy: 55, base_pp: 15 },
    MoveRow { name: "Supersonic", move_type: "Normal", power: 0, accuracy: 55, base_pp: 20 },
    MoveRow { name: "SonicBoom", move_type: "Normal", power: 20, accuracy: 90, base_pp: 20 },
    MoveRow { name: "Disable", move_type: "Normal", power: 0, accuracy: 55, base_pp: 20 },
    MoveRow { name: "Acid", move_type: "Poison", power: 40, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Ember", move_type: "Fire", power: 40, accuracy: 100, base_pp: 25 },
    MoveRow { name: "Flamethrower", move_type: "Fire", power: 95, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Mist", move_type: "Ice", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "WaterGun", move_type: "Water", power: 40, accuracy: 100, base_pp: 25 },
    MoveRow { name: "HydroPump", move_type: "Water", power: 120, accuracy: 80, base_pp: 5 },
    MoveRow { name: "Surf", move_type: "Water", power: 95, accuracy: 100, base_pp: 15 },
    MoveRow { name: "IceBeam", move_type: "Ice", power: 95, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Blizzard", move_type: "Ice", power: 120, accuracy: 90, base_pp: 5 },
    MoveRow { name: "Psybeam", move_type: "Psychic", power: 65, accuracy: 100, base_pp: 20 },
    MoveRow { name: "BubbleBeam", move_type: "Water", power: 65, accuracy: 100, base_pp: 20 },
    MoveRow { name: "AuroraBeam", move_type: "Ice", power: 65, accuracy: 100, base_pp: 20 },
    MoveRow { name: "HyperBeam", move_type: "Normal", power: 150, accuracy: 90, base_pp: 5 },
    MoveRow { name: "Peck", move_type: "Flying", power: 35, accuracy: 100, base_pp: 35 },
    MoveRow { name: "DrillPeck", move_type: "Flying", power: 80, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Submission", move_type: "Fighting", power: 80, accuracy: 80, base_pp: 25 },
    MoveRow { name: "LowKick", move_type: "Fighting", power: 50, accuracy: 90, base_pp: 20 },
    MoveRow { name: "Counter", move_type: "Fighting", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "SeismicToss", move_type: "Fighting", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Strength", move_type: "Normal", power: 80, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Absorb", move_type: "Grass", power: 20, accuracy: 100, base_pp: 25 },
    MoveRow { name: "MegaDrain", move_type: "Grass", power: 40, accuracy: 100, base_pp: 15 },
    MoveRow { name: "LeechSeed", move_type: "Grass", power: 0, accuracy: 90, base_pp: 10 },
    MoveRow { name: "Growth", move_type: "Normal", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "RazorLeaf", move_type: "Grass", power: 55, accuracy: 95, base_pp: 25 },
    MoveRow { name: "SolarBeam", move_type: "Grass", power: 120, accuracy: 100, base_pp: 10 },
    MoveRow { name: "PoisonPowder", move_type: "Poison", power: 0, accuracy: 75, base_pp: 35 },
    MoveRow { name: "StunSpore", move_type: "Grass", power: 0, accuracy: 75, base_pp: 30 },
    MoveRow { name: "SleepPowder", move_type: "Grass", power: 0, accuracy: 75, base_pp: 15 },
    MoveRow { name: "PetalDance", move_type: "Grass", power: 70, accuracy: 100, base_pp: 20 },
    MoveRow { name: "StringShot", move_type: "Bug", power: 0, accuracy: 95, base_pp: 40 },
    MoveRow { name: "DragonRage", move_type: "Dragon", power: 40, accuracy: 100, base_pp: 10 },
    MoveRow { name: "FireSpin", move_type: "Fire", power: 15, accuracy: 70, base_pp: 15 },
    MoveRow { name: "ThunderShock", move_type: "Electric", power: 40, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Thunderbolt", move_type: "Electric", power: 95, accuracy: 100, base_pp: 15 },
    MoveRow { name: "ThunderWave", move_type: "Electric", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Thunder", move_type: "Electric", power: 120, accuracy: 70, base_pp: 10 },
    MoveRow { name: "RockThrow", move_type: "Rock", power: 50, accuracy: 90, base_pp: 15 },
    MoveRow { name: "Earthquake", move_type: "Ground", power: 100, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Fissure", move_type: "Ground", power: 0, accuracy: 30, base_pp: 5 },
    MoveRow { name: "Dig", move_type: "Ground", power: 100, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Toxic", move_type: "Poison", power: 0, accuracy: 85, base_pp: 10 },
    MoveRow { name: "Confusion", move_type: "Psychic", power: 50, accuracy: 100, base_pp: 25 },
    MoveRow { name: "Psychic", move_type: "Psychic", power: 90, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Hypnosis", move_type: "Psychic", power: 0, accuracy: 60, base_pp: 20 },
    MoveRow { name: "Meditate", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "Agility", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "QuickAttack", move_type: "Normal", power: 40, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Rage", move_type: "Normal", power: 20, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Teleport", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "NightShade", move_type: "Ghost", power: 0, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Mimic", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Screech", move_type: "Normal", power: 0, accuracy: 85, base_pp: 40 },
    MoveRow { name: "DoubleTeam", move_type: "Normal", power: 0, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Recover", move_type: "Normal", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Harden", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Minimize", move_type: "Normal", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Smokescreen", move_type: "Normal", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "ConfuseRay", move_type: "Ghost", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Withdraw", move_type: "Water", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "DefenseCurl", move_type: "Normal", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "Barrier", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "LightScreen", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Haze", move_type: "Ice", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Reflect", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "FocusEnergy", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Bide", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Metronome", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "MirrorMove", move_type: "Flying", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "SelfDestruct", move_type: "Normal", power: 200, accuracy: 100, base_pp: 5 },
    MoveRow { name: "EggBomb", move_type: "Normal", power: 100, accuracy: 75, base_pp: 10 },
    MoveRow { name: "Lick", move_type: "Ghost", power: 20, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Smog", move_type: "Poison", power: 20, accuracy: 70, base_pp: 20 },
    MoveRow { name: "Sludge", move_type: "Poison", power: 65, accuracy: 100, base_pp: 20 },
    MoveRow { name: "BoneClub", move_type: "Ground", power: 65, accuracy: 85, base_pp: 20 },
    MoveRow { name: "FireBlast", move_type: "Fire", power: 120, accuracy: 85, base_pp: 5 },
    MoveRow { name: "Waterfall", move_type: "Water", power: 80, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Clamp", move_type: "Water", power: 35, accuracy: 75, base_pp: 10 },
    MoveRow { name: "Swift", move_type: "Normal", power: 60, accuracy: 100, base_pp: 20 },
    MoveRow { name: "SkullBash", move_type: "Normal", power: 100, accuracy: 100, base_pp: 15 },
    MoveRow { name: "SpikeCannon", move_type: "Normal", power: 20, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Constrict", move_type: "Normal", power: 10, accuracy: 100, base_pp: 35 },
    MoveRow { name: "Amnesia", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Kinesis", move_type: "Psychic", power: 0, accuracy: 80, base_pp: 15 },
    MoveRow { name: "SoftBoiled", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "HighJumpKick", move_type: "Fighting", power: 85, accuracy: 90, base_pp: 20 },
    MoveRow { name: "Glare", move_type: "Normal", power: 0, accuracy: 75, base_pp: 30 },
    MoveRow { name: "DreamEater", move_type: "Psychic", power: 100, accuracy: 100, base_pp: 15 },
    MoveRow { name: "PoisonGas", move_type: "Poison", power: 0, accuracy: 55, base_pp: 40 },
    MoveRow { name: "Barrage", move_type: "Normal", power: 15, accuracy: 85, base_pp: 20 },
    MoveRow { name: "LeechLife", move_type: "Bug", power: 20, accuracy: 100, base_pp: 15 },
    MoveRow { name: "LovelyKiss", move_type: "Normal", power: 0, accuracy: 75, base_pp: 10 },
    MoveRow { name: "SkyAttack", move_type: "Flying", power: 140, accuracy: 90, base_pp: 5 },
    MoveRow { name: "Transform", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Bubble", move_type: "Water", power: 20, accuracy: 100, base_pp: 30 },
    MoveRow { name: "DizzyPunch", move_type: "Normal", power: 70, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Spore", move_type: "Grass", power: 0, accuracy: 100, base_pp: 15 },
    MoveRow { name: "Flash", move_type: "Normal", power: 0, accuracy: 70, base_pp: 20 },
    MoveRow { name: "Psywave", move_type: "Psychic", power: 0, accuracy: 80, base_pp: 15 },
    MoveRow { name: "Splash", move_type: "Normal", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "AcidArmor", move_type: "Poison", power: 0, accuracy: 100, base_pp: 40 },
    MoveRow { name: "Crabhammer", move_type: "Water", power: 90, accuracy: 85, base_pp: 10 },
    MoveRow { name: "Explosion", move_type: "Normal", power: 250, accuracy: 100, base_pp: 5 },
    MoveRow { name: "FurySwipes", move_type: "Normal", power: 18, accuracy: 80, base_pp: 15 },
    MoveRow { name: "Bonemerang", move_type: "Ground", power: 50, accuracy: 90, base_pp: 10 },
    MoveRow { name: "Rest", move_type: "Psychic", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "RockSlide", move_type: "Rock", power: 75, accuracy: 90, base_pp: 10 },
    MoveRow { name: "HyperFang", move_type: "Normal", power: 80, accuracy: 90, base_pp: 15 },
    MoveRow { name: "Sharpen", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "Conversion", move_type: "Normal", power: 0, accuracy: 100, base_pp: 30 },
    MoveRow { name: "TriAttack", move_type: "Normal", power: 80, accuracy: 100, base_pp: 10 },
    MoveRow { name: "SuperFang", move_type: "Normal", power: 0, accuracy: 90, base_pp: 10 },
    MoveRow { name: "Slash", move_type: "Normal", power: 70, accuracy: 100, base_pp: 20 },
    MoveRow { name: "Substitute", move_type: "Normal", power: 0, accuracy: 100, base_pp: 10 },
    MoveRow { name: "Struggle", move_type: "Normal", power: 50, accuracy: 100, base_pp: 10 },
];

/// Type-effectiveness multiplier, `EFFECTIVENESS[attacker][defender]`,
/// indexed the same way as [`TYPES`]. `0.0` immune, `0.5` resisted, `2.0` super.
pub const EFFECTIVENESS: [[f32; 15]; 15] = [
    [1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
    [2.0, 1.0, 0.5, 0.5, 1.0, 2.0, 0.5, 0.0, 1.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0],
    [1.0, 2.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0, 2.0, 0.5, 1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 2.0, 0.5, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0, 2.0, 1.0, 2.0, 0.5, 1.0, 2.0, 1.0, 0.5, 2.0, 1.0, 1.0, 1.0],
    [1.0, 0.5, 2.0, 1.0, 0.5, 1.0, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0],
    [1.0, 0.5, 0.5, 0.5, 1.0, 1.0, 1.0, 0.5, 0.5, 1.0, 2.0, 1.0, 2.0, 1.0, 1.0],
    [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 2.0, 1.0, 1.0],
    [1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 0.5, 0.5, 2.0, 1.0, 1.0, 2.0, 0.5],
    [1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0, 1.0, 0.5],
    [1.0, 1.0, 0.5, 0.5, 2.0, 2.0, 0.5, 1.0, 0.5, 2.0, 0.5, 1.0, 1.0, 1.0, 0.5],
    [1.0, 1.0, 2.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 2.0, 0.5, 0.5, 1.0, 1.0, 0.5],
    [1.0, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 1.0, 1.0],
    [1.0, 1.0, 2.0, 1.0, 2.0, 1.0, 1.0, 1.0, 1.0, 0.5, 2.0, 1.0, 1.0, 0.5, 2.0],
    [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 2.0],
];
