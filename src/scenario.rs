//! Scenario catalog: per-bombsite groupings of spawns and the per-round pick.

use crate::error::{ExecutesError, Result};
use crate::spawns::SpawnStore;
use crate::types::{Bombsite, Spawn, Team};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Scenario
// ---------------------------------------------------------------------------

/// One coordinated execute onto a bombsite, with both teams' spawns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub name: String,
    pub bombsite: Bombsite,
    /// Attacker spawns in store order.
    pub attackers: Vec<Spawn>,
    /// Defender spawns in store order.
    pub defenders: Vec<Spawn>,
}

impl Scenario {
    pub fn spawns_for(&self, team: Team) -> &[Spawn] {
        match team {
            Team::Attacker => &self.attackers,
            Team::Defender => &self.defenders,
        }
    }

    /// Both teams need at least one spawn.
    pub fn is_eligible(&self) -> bool {
        !self.attackers.is_empty() && !self.defenders.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
    current: Option<Scenario>,
}

impl ScenarioCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group the store's spawns by bombsite, keeping eligible groups only.
    pub fn build_from_spawns(store: &SpawnStore) -> Vec<Scenario> {
        Bombsite::ALL
            .iter()
            .map(|&site| Scenario {
                name: format!("{} execute", site),
                bombsite: site,
                attackers: store
                    .query(Team::Attacker, site)
                    .into_iter()
                    .cloned()
                    .collect(),
                defenders: store
                    .query(Team::Defender, site)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
            .filter(Scenario::is_eligible)
            .collect()
    }

    /// Re-derive after a map load. The current pick belonged to the old map.
    pub fn rebuild(&mut self, store: &SpawnStore) {
        self.current = None;
        self.refresh(store);
    }

    /// Re-derive after spawns were added to the same map.
    ///
    /// The current pick stays committed until the next round-pre-start.
    pub fn refresh(&mut self, store: &SpawnStore) {
        self.scenarios = Self::build_from_spawns(store);
        debug!(
            "Scenario catalog holds {} eligible scenario(s)",
            self.scenarios.len()
        );
    }

    /// Uniformly pick an eligible scenario and commit it as current.
    ///
    /// On failure the previous pick stays current.
    pub fn pick_random<R: Rng>(&mut self, rng: &mut R) -> Result<&Scenario> {
        if self.scenarios.is_empty() {
            return Err(ExecutesError::NoScenarioAvailable);
        }
        let index = rng.random_range(0..self.scenarios.len());
        let picked = self.scenarios[index].clone();
        info!("Selected scenario '{}'", picked.name);
        Ok(&*self.current.insert(picked))
    }

    pub fn current(&self) -> Option<&Scenario> {
        self.current.as_ref()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}
