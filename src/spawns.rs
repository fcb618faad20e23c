//! Spawn subsystem: the per-map [`SpawnStore`], the [`SpawnSource`] trait it
//! loads from, and the JSON directory / in-memory source implementations.

use crate::error::{ExecutesError, Result};
use crate::types::{Bombsite, NewSpawn, Spawn, SpawnType, Team};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// On-disk format
// ---------------------------------------------------------------------------

/// Spawns registered for a single map, grouped by bombsite.
///
/// Serialized as `{"A": [...], "B": [...]}` where every entry uses the spawn
/// inspection format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MapSpawns {
    #[serde(rename = "A", default)]
    pub a: Vec<Spawn>,
    #[serde(rename = "B", default)]
    pub b: Vec<Spawn>,
}

impl MapSpawns {
    pub fn site(&self, bombsite: Bombsite) -> &[Spawn] {
        match bombsite {
            Bombsite::A => &self.a,
            Bombsite::B => &self.b,
        }
    }

    fn site_mut(&mut self, bombsite: Bombsite) -> &mut Vec<Spawn> {
        match bombsite {
            Bombsite::A => &mut self.a,
            Bombsite::B => &mut self.b,
        }
    }

    pub fn push(&mut self, bombsite: Bombsite, spawn: Spawn) {
        self.site_mut(bombsite).push(spawn);
    }

    pub fn len(&self) -> usize {
        self.a.len() + self.b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.b.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can provide the registered spawns of a map.
///
/// `Ok(None)` means nothing is registered for the map; `Err` means the
/// backing data exists but could not be read.
pub trait SpawnSource: Send + Sync {
    fn spawns_for(&self, map_name: &str) -> Result<Option<MapSpawns>>;
}

/// Reads `<dir>/<map>.json`.
pub struct JsonSpawnDirectory {
    dir: PathBuf,
}

impl JsonSpawnDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, map_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", map_name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl SpawnSource for JsonSpawnDirectory {
    fn spawns_for(&self, map_name: &str) -> Result<Option<MapSpawns>> {
        let path = self.path_for(map_name);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ExecutesError::Load {
                    map: map_name.to_string(),
                    reason: format!("{}: {}", path.display(), e),
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| ExecutesError::Load {
                map: map_name.to_string(),
                reason: format!("{}: {}", path.display(), e),
            })
    }
}

/// Map name → spawns table held in memory.
#[derive(Default)]
pub struct MemorySpawnSource {
    maps: HashMap<String, MapSpawns>,
}

impl MemorySpawnSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_map(mut self, map_name: impl Into<String>, spawns: MapSpawns) -> Self {
        self.insert(map_name, spawns);
        self
    }

    pub fn insert(&mut self, map_name: impl Into<String>, spawns: MapSpawns) {
        self.maps.insert(map_name.into(), spawns);
    }
}

impl SpawnSource for MemorySpawnSource {
    fn spawns_for(&self, map_name: &str) -> Result<Option<MapSpawns>> {
        Ok(self.maps.get(map_name).cloned())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Spawn points of the currently loaded map.
///
/// Entries keep insertion order so queries are stable across calls.
#[derive(Debug, Default)]
pub struct SpawnStore {
    map_name: Option<String>,
    entries: Vec<(Bombsite, Spawn)>,
}

impl SpawnStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held spawns with those registered for `map_name`.
    ///
    /// Returns `false` when nothing usable is registered; the store is then
    /// left empty (the previous map's spawns are gone either way).
    pub fn load(&mut self, source: &dyn SpawnSource, map_name: &str) -> bool {
        self.clear();
        self.map_name = Some(map_name.to_string());

        let spawns = match source.spawns_for(map_name) {
            Ok(Some(spawns)) => spawns,
            Ok(None) => {
                warn!("No spawns registered for map '{}'", map_name);
                return false;
            }
            Err(e) => {
                warn!("{}", e);
                return false;
            }
        };

        match Self::number(spawns) {
            Ok(entries) if entries.is_empty() => {
                warn!("Spawn data for map '{}' is empty", map_name);
                false
            }
            Ok(entries) => {
                info!("Loaded {} spawns for map '{}'", entries.len(), map_name);
                self.entries = entries;
                true
            }
            Err(e) => {
                warn!("Spawn data for map '{}' is malformed: {}", map_name, e);
                false
            }
        }
    }

    /// Flatten per-site spawns, keeping persisted ids and numbering the rest.
    fn number(spawns: MapSpawns) -> Result<Vec<(Bombsite, Spawn)>> {
        let mut seen = HashSet::new();
        for spawn in spawns.a.iter().chain(spawns.b.iter()) {
            if spawn.id() != Spawn::UNASSIGNED_ID && !seen.insert(spawn.id()) {
                return Err(ExecutesError::Validation(format!(
                    "duplicate spawn id {}",
                    spawn.id()
                )));
            }
        }

        let mut next_id = seen.iter().copied().max().unwrap_or(0).checked_add(1);
        let mut entries = Vec::with_capacity(spawns.len());
        let MapSpawns { a, b } = spawns;
        let sited = a
            .into_iter()
            .map(|s| (Bombsite::A, s))
            .chain(b.into_iter().map(|s| (Bombsite::B, s)));
        for (site, spawn) in sited {
            let spawn = if spawn.id() == Spawn::UNASSIGNED_ID {
                let id = next_id.ok_or_else(Self::ids_exhausted)?;
                next_id = id.checked_add(1);
                spawn.with_id(id)
            } else {
                spawn
            };
            entries.push((site, spawn));
        }
        Ok(entries)
    }

    /// Validate and append a new spawn, returning it with its assigned id.
    pub fn add_spawn(&mut self, request: NewSpawn) -> Result<Spawn> {
        let team: Team = request.team.parse()?;
        let bombsite: Bombsite = request.bombsite.parse()?;
        let position = request
            .position
            .ok_or_else(|| ExecutesError::Validation("spawn position is missing".into()))?;
        let angle = request
            .angle
            .ok_or_else(|| ExecutesError::Validation("spawn angle is missing".into()))?;

        let id = self.next_id()?;
        let spawn = Spawn::new(
            request.name.unwrap_or_else(|| "Spawn".to_string()),
            position,
            angle,
            team,
            request.spawn_type.unwrap_or(SpawnType::Lurker),
        )
        .with_id(id);

        debug!(
            "Added spawn {} ({} @ {}) at {}",
            spawn.id(),
            team,
            bombsite,
            position
        );
        self.entries.push((bombsite, spawn.clone()));
        Ok(spawn)
    }

    fn next_id(&self) -> Result<u32> {
        self.entries
            .iter()
            .map(|(_, s)| s.id())
            .max()
            .unwrap_or(Spawn::UNASSIGNED_ID)
            .checked_add(1)
            .ok_or_else(Self::ids_exhausted)
    }

    fn ids_exhausted() -> ExecutesError {
        ExecutesError::Validation(format!("spawn ids exhausted (max {})", u32::MAX))
    }

    /// Spawns for one team at one bombsite, in insertion order.
    pub fn query(&self, team: Team, bombsite: Bombsite) -> Vec<&Spawn> {
        self.entries
            .iter()
            .filter(|(site, spawn)| *site == bombsite && spawn.team() == team)
            .map(|(_, spawn)| spawn)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bombsite, &Spawn)> {
        self.entries.iter().map(|(site, spawn)| (*site, spawn))
    }

    pub fn get(&self, id: u32) -> Option<&Spawn> {
        self.entries
            .iter()
            .map(|(_, spawn)| spawn)
            .find(|spawn| spawn.id() == id)
    }

    pub fn map_name(&self) -> Option<&str> {
        self.map_name.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.map_name = None;
        self.entries.clear();
    }

    /// Export in the on-disk format so the host can persist added spawns.
    pub fn to_map_spawns(&self) -> MapSpawns {
        let mut out = MapSpawns::default();
        for (site, spawn) in &self.entries {
            out.push(*site, spawn.clone());
        }
        out
    }
}
