//! Core value types shared across all modules.

use crate::error::{ExecutesError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// View orientation in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Angle {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Angle {
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.1}, {:.1}, {:.1}]", self.pitch, self.yaw, self.roll)
    }
}

// ---------------------------------------------------------------------------
// Teams, bombsites, spawn roles
// ---------------------------------------------------------------------------

/// Playing side. Serialized with the host's short team tokens.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Team {
    #[serde(rename = "T")]
    Attacker,
    #[serde(rename = "CT")]
    Defender,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Attacker, Team::Defender];

    pub fn token(self) -> &'static str {
        match self {
            Team::Attacker => "T",
            Team::Defender => "CT",
        }
    }
}

impl FromStr for Team {
    type Err = ExecutesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "T" => Ok(Team::Attacker),
            "CT" => Ok(Team::Defender),
            other => Err(ExecutesError::Validation(format!(
                "team must be T or CT (got '{}')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Bombsite {
    A,
    B,
}

impl Bombsite {
    pub const ALL: [Bombsite; 2] = [Bombsite::A, Bombsite::B];
}

impl FromStr for Bombsite {
    type Err = ExecutesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Bombsite::A),
            "B" => Ok(Bombsite::B),
            other => Err(ExecutesError::Validation(format!(
                "bombsite must be A or B (got '{}')",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Bombsite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bombsite::A => f.write_str("A"),
            Bombsite::B => f.write_str("B"),
        }
    }
}

/// Behavior tag a spawn carries into the round.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnType {
    Normal,
    /// Splits off from the execute and plays a flank.
    #[default]
    Lurker,
    /// Part of the main push onto the site.
    Stack,
}

// ---------------------------------------------------------------------------
// Spawn
// ---------------------------------------------------------------------------

/// A recorded spawn point.
///
/// The serialized form is the inspection format external tooling parses:
/// `{id, name, position:{x,y,z}, angle:{pitch,yaw,roll}, team, spawnType}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Spawn {
    id: u32,
    name: String,
    position: Vec3,
    angle: Angle,
    team: Team,
    #[serde(rename = "spawnType")]
    spawn_type: SpawnType,
}

impl Spawn {
    /// Sentinel id for spawns not yet held by a store.
    pub const UNASSIGNED_ID: u32 = 0;

    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        angle: Angle,
        team: Team,
        spawn_type: SpawnType,
    ) -> Self {
        Self {
            id: Self::UNASSIGNED_ID,
            name: name.into(),
            position,
            angle,
            team,
            spawn_type,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn with_id(mut self, id: u32) -> Self {
        self.id = id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn spawn_type(&self) -> SpawnType {
        self.spawn_type
    }
}

/// Raw add-spawn request as it arrives from the host command surface.
///
/// Tokens are validated by [`crate::spawns::SpawnStore::add_spawn`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSpawn {
    pub team: String,
    pub bombsite: String,
    pub position: Option<Vec3>,
    pub angle: Option<Angle>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub spawn_type: Option<SpawnType>,
}

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Opaque per-connection handle owned by the host (user id / slot).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerHandle(pub u64);

impl std::fmt::Display for PlayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Stats & config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionStats {
    pub map: Option<String>,
    pub spawns: usize,
    pub eligible_scenarios: usize,
    pub queued_players: usize,
    pub rounds_started: u64,
    pub current_scenario: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutesConfig {
    /// Directory holding one `<map>.json` spawn file per map.
    pub spawn_dir: PathBuf,
    /// Scenario selection seed. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Log every placement at round start.
    pub log_assignments: bool,
}

impl Default for ExecutesConfig {
    fn default() -> Self {
        Self {
            spawn_dir: PathBuf::from("spawns"),
            seed: None,
            log_assignments: true,
        }
    }
}

impl ExecutesConfig {
    /// Layer defaults, an optional TOML file, then `EXECUTES_*` env vars.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())?;
        let mut builder = ::config::Config::builder().add_source(defaults);
        if let Some(path) = file {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        let settings = builder
            .add_source(::config::Environment::with_prefix("EXECUTES"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
