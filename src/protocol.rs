//! Host event and output protocol.
//!
//! This module owns **every message that crosses the host boundary**: the
//! lifecycle events the game server delivers, and the values the session
//! hands back for the host to apply or print.
//!
//! ## Design rules
//!
//! 1. Every type is `Serialize + Deserialize` with snake_case JSON tags.
//! 2. Events are tagged by `"event"`, outputs by `"output"`.
//! 3. Outputs are pure data. Teleporting, printing and permission checks
//!    are host work.
//!
//! ## Event stream example
//!
//! ```text
//! {"event":"map_start","map":"de_dust2"}
//! {"event":"player_connect","player":7}
//! {"event":"player_team","player":7,"team":"T"}
//! {"event":"round_pre_start"}
//! {"event":"round_start"}
//! ```

use crate::assign::Assignment;
use crate::types::{Bombsite, NewSpawn, PlayerHandle, SessionStats, Spawn, Team};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Inbound
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostEvent {
    MapStart {
        map: String,
    },
    /// Player finished connecting and is eligible for the queue.
    PlayerConnect {
        player: PlayerHandle,
    },
    PlayerDisconnect {
        player: PlayerHandle,
    },
    /// Host moved a player to a side (`null` for spectators).
    PlayerTeam {
        player: PlayerHandle,
        #[serde(default)]
        team: Option<Team>,
    },
    RoundPreStart,
    RoundStart,
    RoundEnd,
    /// Authorized add-spawn command, carrying the invoker's position/angle.
    AddSpawn {
        #[serde(flatten)]
        spawn: NewSpawn,
    },
    Stats,
}

impl HostEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HostEvent::MapStart { .. } => "map_start",
            HostEvent::PlayerConnect { .. } => "player_connect",
            HostEvent::PlayerDisconnect { .. } => "player_disconnect",
            HostEvent::PlayerTeam { .. } => "player_team",
            HostEvent::RoundPreStart => "round_pre_start",
            HostEvent::RoundStart => "round_start",
            HostEvent::RoundEnd => "round_end",
            HostEvent::AddSpawn { .. } => "add_spawn",
            HostEvent::Stats => "stats",
        }
    }
}

// ---------------------------------------------------------------------------
// Outbound
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "output", rename_all = "snake_case")]
pub enum SessionOutput {
    MapLoaded {
        map: String,
        loaded: bool,
        scenarios: usize,
    },
    ScenarioSelected {
        name: String,
        bombsite: Bombsite,
    },
    /// Player → spawn mapping for the host to apply.
    Assignment(Assignment),
    /// Echo of a newly added spawn in the inspection format.
    SpawnAdded {
        spawn: Spawn,
    },
    Stats(SessionStats),
    Error {
        message: String,
    },
}
