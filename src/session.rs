//! ExecutesSession – per-map-session orchestration context.
//!
//! Owns the spawn store, scenario catalog, player queue and selection RNG.
//! Every host event maps onto one handler method; [`ExecutesSession::dispatch`]
//! routes a [`HostEvent`] to the right one.
//!
//! All handlers take `&mut self` and run to completion on the caller's
//! thread. The session itself holds no locks: it assumes the host delivers
//! events serially. A multi-threaded host must put the whole session behind
//! one mutex (see `host::HostAgent`).

use crate::assign::{Assignment, SpawnAssigner};
use crate::error::Result;
use crate::protocol::{HostEvent, SessionOutput};
use crate::queue::PlayerQueue;
use crate::scenario::{Scenario, ScenarioCatalog};
use crate::spawns::{JsonSpawnDirectory, SpawnSource, SpawnStore};
use crate::types::{ExecutesConfig, NewSpawn, PlayerHandle, SessionStats, Spawn, Team};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;

pub struct ExecutesSession {
    config: ExecutesConfig,
    source: Arc<dyn SpawnSource>,
    spawns: SpawnStore,
    catalog: ScenarioCatalog,
    queue: PlayerQueue,
    assigner: SpawnAssigner,
    rng: ChaCha8Rng,
    rounds_started: u64,
}

impl ExecutesSession {
    pub fn new(config: ExecutesConfig, source: Arc<dyn SpawnSource>) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };

        Self {
            config,
            source,
            spawns: SpawnStore::new(),
            catalog: ScenarioCatalog::new(),
            queue: PlayerQueue::new(),
            assigner: SpawnAssigner::new(),
            rng,
            rounds_started: 0,
        }
    }

    /// Session backed by the config's spawn directory.
    pub fn from_config(config: ExecutesConfig) -> Self {
        let source = Arc::new(JsonSpawnDirectory::new(config.spawn_dir.clone()));
        Self::new(config, source)
    }

    /// Hot reload: build the session and load the map that is already running.
    pub fn with_map(config: ExecutesConfig, source: Arc<dyn SpawnSource>, map: &str) -> Self {
        let mut session = Self::new(config, source);
        session.on_map_start(map);
        session
    }

    // -----------------------------------------------------------------------
    // Map lifecycle
    // -----------------------------------------------------------------------

    /// Load the map's spawns and re-derive scenarios.
    ///
    /// A `false` return means "no scenarios this map"; the session keeps
    /// working and later rounds report `NoScenarioAvailable`.
    pub fn on_map_start(&mut self, map: &str) -> bool {
        let loaded = self.spawns.load(self.source.as_ref(), map);
        if !loaded {
            warn!("Failed to load spawns for '{}'", map);
        }
        self.catalog.rebuild(&self.spawns);
        loaded
    }

    // -----------------------------------------------------------------------
    // Player management
    // -----------------------------------------------------------------------

    pub fn on_player_connect(&mut self, player: PlayerHandle) -> bool {
        self.queue.enqueue(player)
    }

    pub fn on_player_disconnect(&mut self, player: PlayerHandle) -> bool {
        self.queue.drop_player(player)
    }

    pub fn on_player_team(&mut self, player: PlayerHandle, team: Option<Team>) -> bool {
        let known = self.queue.set_team(player, team);
        if !known {
            debug!("Team change for unqueued player {} ignored", player);
        }
        known
    }

    // -----------------------------------------------------------------------
    // Round lifecycle
    // -----------------------------------------------------------------------

    /// Pick this round's scenario. `None` keeps last round's scenario.
    pub fn on_round_pre_start(&mut self) -> Option<&Scenario> {
        match self.catalog.pick_random(&mut self.rng) {
            Ok(scenario) => Some(scenario),
            Err(e) => {
                warn!("Failed to get a scenario: {}", e);
                None
            }
        }
    }

    /// Assign queued players to the current scenario's spawns.
    ///
    /// `None` means the round runs with the host's default spawns.
    pub fn on_round_start(&mut self) -> Option<Assignment> {
        self.rounds_started += 1;
        let snapshot = self.queue.snapshot();

        match self.assigner.assign(self.catalog.current(), &snapshot) {
            Ok(assignment) => {
                info!(
                    "Round {}: '{}' placed {} player(s), {} unassigned",
                    self.rounds_started,
                    assignment.scenario,
                    assignment.placements.len(),
                    assignment.unassigned.len()
                );
                if self.config.log_assignments {
                    for p in &assignment.placements {
                        debug!(
                            "  {} ({}) -> spawn {} '{}' at {} facing {}",
                            p.player, p.team, p.spawn_id, p.spawn_name, p.position, p.angle
                        );
                    }
                }
                Some(assignment)
            }
            Err(e) => {
                warn!("Skipping spawn assignment: {}", e);
                None
            }
        }
    }

    pub fn on_round_end(&mut self) {
        debug!("Round {} ended", self.rounds_started);
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Add a spawn at the invoker's location and make it selectable.
    pub fn add_spawn(&mut self, request: NewSpawn) -> Result<Spawn> {
        let spawn = self.spawns.add_spawn(request)?;
        self.catalog.refresh(&self.spawns);
        Ok(spawn)
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Route one host event to its handler.
    pub fn dispatch(&mut self, event: HostEvent) -> Option<SessionOutput> {
        debug!("Event {}", event.name());
        match event {
            HostEvent::MapStart { map } => {
                let loaded = self.on_map_start(&map);
                Some(SessionOutput::MapLoaded {
                    map,
                    loaded,
                    scenarios: self.catalog.len(),
                })
            }
            HostEvent::PlayerConnect { player } => {
                self.on_player_connect(player);
                None
            }
            HostEvent::PlayerDisconnect { player } => {
                self.on_player_disconnect(player);
                None
            }
            HostEvent::PlayerTeam { player, team } => {
                self.on_player_team(player, team);
                None
            }
            HostEvent::RoundPreStart => {
                self.on_round_pre_start()
                    .map(|s| SessionOutput::ScenarioSelected {
                        name: s.name.clone(),
                        bombsite: s.bombsite,
                    })
            }
            HostEvent::RoundStart => self.on_round_start().map(SessionOutput::Assignment),
            HostEvent::RoundEnd => {
                self.on_round_end();
                None
            }
            HostEvent::AddSpawn { spawn } => Some(match self.add_spawn(spawn) {
                Ok(spawn) => SessionOutput::SpawnAdded { spawn },
                Err(e) => SessionOutput::Error {
                    message: e.to_string(),
                },
            }),
            HostEvent::Stats => Some(SessionOutput::Stats(self.stats())),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            map: self.spawns.map_name().map(str::to_string),
            spawns: self.spawns.len(),
            eligible_scenarios: self.catalog.len(),
            queued_players: self.queue.len(),
            rounds_started: self.rounds_started,
            current_scenario: self.catalog.current().map(|s| s.name.clone()),
        }
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.catalog.current()
    }

    pub fn spawns(&self) -> &SpawnStore {
        &self.spawns
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn queue(&self) -> &PlayerQueue {
        &self.queue
    }

    pub fn config(&self) -> &ExecutesConfig {
        &self.config
    }
}
