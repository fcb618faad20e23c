//! Round-start spawn assignment.
//!
//! For each team the queue snapshot is filtered to that team's members in
//! queue order, and the i-th member takes the team's i-th scenario spawn.
//! There is no randomness: identical inputs produce an identical
//! [`Assignment`].

use crate::error::{ExecutesError, Result};
use crate::queue::QueueSnapshot;
use crate::scenario::Scenario;
use crate::types::{Angle, Bombsite, PlayerHandle, Team, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Where one player goes this round. Pure data; the host does the teleport.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Placement {
    pub player: PlayerHandle,
    pub team: Team,
    pub spawn_id: u32,
    pub spawn_name: String,
    pub position: Vec3,
    pub angle: Angle,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub scenario: String,
    pub bombsite: Bombsite,
    /// Attackers first, then defenders, each in queue order.
    pub placements: Vec<Placement>,
    /// Players without a spawn this round (capacity shortfall or no team),
    /// in queue order. The host falls back to its default spawn for these.
    pub unassigned: Vec<PlayerHandle>,
}

impl Assignment {
    pub fn placement_for(&self, player: PlayerHandle) -> Option<&Placement> {
        self.placements.iter().find(|p| p.player == player)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SpawnAssigner;

impl SpawnAssigner {
    pub fn new() -> Self {
        Self
    }

    pub fn assign(
        &self,
        scenario: Option<&Scenario>,
        snapshot: &QueueSnapshot,
    ) -> Result<Assignment> {
        let scenario = scenario.ok_or(ExecutesError::NoScenario)?;

        let mut placements = Vec::new();
        let mut overflowed = HashSet::new();

        for team in Team::ALL {
            let spawns = scenario.spawns_for(team);
            let mut members = snapshot.team(team);

            // Spawns lead the zip so a surplus member is never consumed.
            for (spawn, player) in spawns.iter().zip(members.by_ref()) {
                placements.push(Placement {
                    player,
                    team,
                    spawn_id: spawn.id(),
                    spawn_name: spawn.name().to_string(),
                    position: spawn.position(),
                    angle: spawn.angle(),
                });
            }

            let overflow: Vec<PlayerHandle> = members.collect();
            if !overflow.is_empty() {
                warn!(
                    "Scenario '{}' seats {} {} player(s); {} left unassigned",
                    scenario.name,
                    spawns.len(),
                    team,
                    overflow.len()
                );
                overflowed.extend(overflow);
            }
        }

        let unassigned = snapshot
            .players
            .iter()
            .filter(|p| p.team.is_none() || overflowed.contains(&p.player))
            .map(|p| p.player)
            .collect();

        Ok(Assignment {
            scenario: scenario.name.clone(),
            bombsite: scenario.bombsite,
            placements,
            unassigned,
        })
    }
}
