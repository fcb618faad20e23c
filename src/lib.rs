//! Executes
//!
//! Round-lifecycle orchestration for retake/execute style game modes: pick a
//! bombsite scenario each round, keep a queue of connected players, and map
//! that queue onto the scenario's spawn points.
//!
//! ## Architecture
//!
//! ```text
//! HostAgent  (host.rs)             ← JSON-lines host event adapter
//!   └── ExecutesSession  (session.rs)  ← one per map session
//!         ├── SpawnStore       (spawns.rs)   ← SpawnSource per map
//!         ├── ScenarioCatalog  (scenario.rs)
//!         ├── PlayerQueue      (queue.rs)
//!         └── SpawnAssigner    (assign.rs)
//! ```
//!
//! The session is single-threaded: handlers take `&mut self` and never
//! block. `HostAgent` is the only piece that shares it across threads.

// Core modules are always available (no server feature needed).
pub mod assign;
pub mod error;
pub mod protocol;
pub mod queue;
pub mod scenario;
pub mod session;
pub mod spawns;
pub mod types;

// The host adapter requires the `server` feature.
#[cfg(feature = "server")]
pub mod host;

#[cfg(feature = "server")]
pub use host::HostAgent;
pub use assign::{Assignment, Placement, SpawnAssigner};
pub use error::{ExecutesError, Result};
pub use protocol::{HostEvent, SessionOutput};
pub use queue::{PlayerQueue, QueueSnapshot, QueuedPlayer};
pub use scenario::{Scenario, ScenarioCatalog};
pub use session::ExecutesSession;
pub use spawns::{JsonSpawnDirectory, MapSpawns, MemorySpawnSource, SpawnSource, SpawnStore};
pub use types::{
    Angle, Bombsite, ExecutesConfig, NewSpawn, PlayerHandle, SessionStats, Spawn, SpawnType,
    Team, Vec3,
};
