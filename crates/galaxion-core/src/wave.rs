//! Wave descriptors: formation layout, sway tuning, and scripted entry
//! squads, loaded from JSON.
//!
//! A wave document holds a `formation` slot list, an optional `sway` block,
//! and any number of `path<N>` (single squad) or `path<N>L` / `path<N>R`
//! (mirrored pair) entries. Squads run in ascending `N`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::enums::EnemyType;
use crate::types::Vector2;

#[derive(Debug, Error)]
pub enum WaveError {
    #[error("malformed wave descriptor: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unrecognised key `{0}` (expected `formation`, `sway` or `path<N>[L|R]`)")]
    UnknownKey(String),
    #[error("squad {0} has a left path but no right path")]
    MissingRight(u32),
    #[error("squad {0} has a right path but no left path")]
    MissingLeft(u32),
    #[error("squad {0} is declared both single and mirrored")]
    AmbiguousSquad(u32),
    #[error("squad path `{key}` needs at least two waypoints")]
    TooFewPoints { key: String },
    #[error("squad path `{key}` marks trigger {index} past its last waypoint")]
    TriggerOutOfRange { key: String, index: usize },
    #[error("squad path `{key}` assigns slot {slot} but the formation has {slots} slots")]
    SlotOutOfRange {
        key: String,
        slot: usize,
        slots: usize,
    },
    #[error("wave has no formation slots")]
    EmptyFormation,
}

/// `{x, y}` point as written in descriptor files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct PointDef {
    x: f32,
    y: f32,
}

impl From<PointDef> for Vector2 {
    fn from(p: PointDef) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// One enemy of a squad: what to spawn and which slot it flies home to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnAssignment {
    pub enemy_type: EnemyType,
    /// `None` for a one-shot enemy that leaves after its entry path.
    pub formation_slot: Option<usize>,
}

/// Scripted entry path shared by one squad's enemies.
#[derive(Debug, Clone, PartialEq)]
pub struct SquadPath {
    pub points: Vec<Vector2>,
    pub triggers: Vec<usize>,
    pub enemies: Vec<SpawnAssignment>,
}

#[derive(Debug, Clone, Deserialize)]
struct SquadPathDef {
    points: Vec<PointDef>,
    #[serde(default)]
    triggers: Vec<usize>,
    enemies: Vec<SpawnAssignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SquadDescriptor {
    Single(SquadPath),
    /// Left and right halves that spawn in lockstep.
    Mirrored { left: SquadPath, right: SquadPath },
}

impl SquadDescriptor {
    pub fn enemy_count(&self) -> usize {
        match self {
            SquadDescriptor::Single(path) => path.enemies.len(),
            SquadDescriptor::Mirrored { left, right } => left.enemies.len() + right.enemies.len(),
        }
    }
}

/// Side-to-side sway of the formation while squads arrive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SwaySettings {
    pub distance: f32,
    pub duration_ms: f32,
    pub cycles: u32,
}

impl Default for SwaySettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_SWAY_DISTANCE,
            duration_ms: DEFAULT_SWAY_DURATION_MS,
            cycles: DEFAULT_SWAY_CYCLES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WaveDescriptor {
    pub formation: Vec<Vector2>,
    pub sway: SwaySettings,
    pub squads: Vec<SquadDescriptor>,
}

#[derive(Deserialize)]
struct WaveDef {
    formation: Vec<PointDef>,
    #[serde(default)]
    sway: SwaySettings,
    #[serde(flatten)]
    paths: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Side {
    Single,
    Left,
    Right,
}

/// Split `path12L` into `(12, Left)`.
fn parse_path_key(key: &str) -> Option<(u32, Side)> {
    let rest = key.strip_prefix("path")?;
    let (digits, side) = match rest.as_bytes().last()? {
        b'L' => (&rest[..rest.len() - 1], Side::Left),
        b'R' => (&rest[..rest.len() - 1], Side::Right),
        _ => (rest, Side::Single),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|n| (n, side))
}

impl WaveDescriptor {
    pub fn from_json(json: &str) -> Result<Self, WaveError> {
        let def: WaveDef = serde_json::from_str(json)?;
        Self::from_def(def)
    }

    fn from_def(def: WaveDef) -> Result<Self, WaveError> {
        let formation: Vec<Vector2> = def.formation.into_iter().map(Vector2::from).collect();
        if formation.is_empty() {
            return Err(WaveError::EmptyFormation);
        }

        let mut grouped: BTreeMap<u32, BTreeMap<Side, SquadPath>> = BTreeMap::new();
        for (key, value) in def.paths {
            let (n, side) = parse_path_key(&key).ok_or_else(|| WaveError::UnknownKey(key.clone()))?;
            let raw: SquadPathDef = serde_json::from_value(value)?;
            let path = validate_path(&key, raw, formation.len())?;
            grouped.entry(n).or_default().insert(side, path);
        }

        let mut squads = Vec::with_capacity(grouped.len());
        for (n, mut sides) in grouped {
            let single = sides.remove(&Side::Single);
            let left = sides.remove(&Side::Left);
            let right = sides.remove(&Side::Right);
            let squad = match (single, left, right) {
                (Some(path), None, None) => SquadDescriptor::Single(path),
                (None, Some(left), Some(right)) => SquadDescriptor::Mirrored { left, right },
                (None, Some(_), None) => return Err(WaveError::MissingRight(n)),
                (None, None, Some(_)) => return Err(WaveError::MissingLeft(n)),
                _ => return Err(WaveError::AmbiguousSquad(n)),
            };
            squads.push(squad);
        }

        Ok(Self {
            formation,
            sway: def.sway,
            squads,
        })
    }

    pub fn slot_count(&self) -> usize {
        self.formation.len()
    }

    pub fn enemy_count(&self) -> usize {
        self.squads.iter().map(SquadDescriptor::enemy_count).sum()
    }
}

fn validate_path(key: &str, raw: SquadPathDef, slots: usize) -> Result<SquadPath, WaveError> {
    if raw.points.len() < 2 {
        return Err(WaveError::TooFewPoints { key: key.into() });
    }
    if let Some(&index) = raw.triggers.iter().find(|&&i| i >= raw.points.len()) {
        return Err(WaveError::TriggerOutOfRange {
            key: key.into(),
            index,
        });
    }
    for assignment in &raw.enemies {
        if let Some(slot) = assignment.formation_slot.filter(|&s| s >= slots) {
            return Err(WaveError::SlotOutOfRange {
                key: key.into(),
                slot,
                slots,
            });
        }
    }
    Ok(SquadPath {
        points: raw.points.into_iter().map(Vector2::from).collect(),
        triggers: raw.triggers,
        enemies: raw.enemies,
    })
}

/// Parse a campaign: a JSON array of wave documents.
pub fn parse_campaign(json: &str) -> Result<Vec<WaveDescriptor>, WaveError> {
    let defs: Vec<WaveDef> = serde_json::from_str(json)?;
    defs.into_iter().map(WaveDescriptor::from_def).collect()
}

// --- Built-in campaign ---

const FORMATION_TOP: f32 = 80.0;
const FORMATION_ROW_GAP: f32 = 32.0;
const FORMATION_COL_GAP: f32 = 32.0;
const SPRITE_HALF: f32 = 16.0;

/// Slot counts per row, top to bottom: bosses, butterflies, bees.
const FORMATION_ROWS: [usize; 3] = [4, 8, 10];

/// The classic grid: 4 bosses, 8 butterflies, 10 bees, centred.
pub fn default_formation() -> Vec<Vector2> {
    let mut slots = Vec::new();
    for (row, &count) in FORMATION_ROWS.iter().enumerate() {
        let y = FORMATION_TOP + row as f32 * FORMATION_ROW_GAP;
        for col in 0..count {
            let from_center = col as f32 - (count as f32 - 1.0) * 0.5;
            let x = WORLD_WIDTH * 0.5 - SPRITE_HALF + from_center * FORMATION_COL_GAP;
            slots.push(Vector2::new(x, y));
        }
    }
    slots
}

fn mirror(points: &[Vector2]) -> Vec<Vector2> {
    points
        .iter()
        .map(|p| Vector2::new(WORLD_WIDTH - 2.0 * SPRITE_HALF - p.x, p.y))
        .collect()
}

fn assign(enemy_type: EnemyType, slots: impl IntoIterator<Item = usize>) -> Vec<SpawnAssignment> {
    slots
        .into_iter()
        .map(|slot| SpawnAssignment {
            enemy_type,
            formation_slot: Some(slot),
        })
        .collect()
}

fn top_swoop() -> Vec<Vector2> {
    [
        (200.0, -32.0),
        (200.0, 120.0),
        (140.0, 260.0),
        (80.0, 340.0),
        (48.0, 300.0),
        (96.0, 240.0),
    ]
    .into_iter()
    .map(|(x, y)| Vector2::new(x, y))
    .collect()
}

fn side_loop() -> Vec<Vector2> {
    [
        (-32.0, 480.0),
        (120.0, 440.0),
        (208.0, 360.0),
        (176.0, 288.0),
        (112.0, 304.0),
        (128.0, 368.0),
    ]
    .into_iter()
    .map(|(x, y)| Vector2::new(x, y))
    .collect()
}

fn pass_through() -> Vec<Vector2> {
    [
        (-32.0, 200.0),
        (160.0, 260.0),
        (320.0, 420.0),
        (400.0, WORLD_HEIGHT + OFFSCREEN_MARGIN * 2.0),
    ]
    .into_iter()
    .map(|(x, y)| Vector2::new(x, y))
    .collect()
}

/// Two built-in waves, used when no descriptor file is supplied.
pub fn default_campaign() -> Vec<WaveDescriptor> {
    let formation = default_formation();
    // Slot ranges by row: bosses 0..4, butterflies 4..12, bees 12..22.
    let wave_one = WaveDescriptor {
        formation: formation.clone(),
        sway: SwaySettings::default(),
        squads: vec![
            SquadDescriptor::Mirrored {
                left: SquadPath {
                    points: top_swoop(),
                    triggers: vec![2],
                    enemies: assign(EnemyType::Bee, 12..17),
                },
                right: SquadPath {
                    points: mirror(&top_swoop()),
                    triggers: vec![2],
                    enemies: assign(EnemyType::Bee, 17..22),
                },
            },
            SquadDescriptor::Single(SquadPath {
                points: side_loop(),
                triggers: vec![1],
                enemies: [assign(EnemyType::Boss, 0..4), assign(EnemyType::Butterfly, 4..8)].concat(),
            }),
            SquadDescriptor::Mirrored {
                left: SquadPath {
                    points: side_loop(),
                    triggers: vec![],
                    enemies: assign(EnemyType::Butterfly, 8..10),
                },
                right: SquadPath {
                    points: mirror(&side_loop()),
                    triggers: vec![],
                    enemies: assign(EnemyType::Butterfly, 10..12),
                },
            },
        ],
    };

    let mut wave_two = wave_one.clone();
    wave_two.sway.cycles = 3;
    wave_two.squads.push(SquadDescriptor::Single(SquadPath {
        points: pass_through(),
        triggers: vec![1, 2],
        enemies: vec![
            SpawnAssignment {
                enemy_type: EnemyType::Bee,
                formation_slot: None,
            };
            3
        ],
    }));

    vec![wave_one, wave_two]
}
