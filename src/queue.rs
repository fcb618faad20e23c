//! Join/leave queue of connected players.

use crate::types::{PlayerHandle, Team};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A queued player as seen at snapshot time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueuedPlayer {
    pub player: PlayerHandle,
    /// `None` until the host places the player on a playing side.
    pub team: Option<Team>,
}

/// Owned, ordered copy of the queue. Later queue mutations never show up here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueSnapshot {
    pub players: Vec<QueuedPlayer>,
}

impl QueueSnapshot {
    pub fn from_players(players: Vec<QueuedPlayer>) -> Self {
        Self { players }
    }

    /// Members of `team`, in queue order.
    pub fn team(&self, team: Team) -> impl Iterator<Item = PlayerHandle> + '_ {
        self.players
            .iter()
            .filter(move |p| p.team == Some(team))
            .map(|p| p.player)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// Players in first-enqueue order.
///
/// `teams` doubles as the membership index, so every handle in `order` has
/// exactly one entry there.
#[derive(Debug, Default)]
pub struct PlayerQueue {
    order: Vec<PlayerHandle>,
    teams: HashMap<PlayerHandle, Option<Team>>,
}

impl PlayerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `player` unless already queued. Returns whether it was added.
    pub fn enqueue(&mut self, player: PlayerHandle) -> bool {
        if self.teams.contains_key(&player) {
            return false;
        }
        self.teams.insert(player, None);
        self.order.push(player);
        debug!("Queued player {} ({} queued)", player, self.order.len());
        true
    }

    /// Remove `player` if queued. Returns whether it was removed.
    pub fn drop_player(&mut self, player: PlayerHandle) -> bool {
        if self.teams.remove(&player).is_none() {
            return false;
        }
        self.order.retain(|p| *p != player);
        debug!("Dropped player {} ({} queued)", player, self.order.len());
        true
    }

    /// Record the side the host put `player` on. Ignored for absent players.
    pub fn set_team(&mut self, player: PlayerHandle, team: Option<Team>) -> bool {
        match self.teams.get_mut(&player) {
            Some(slot) => {
                *slot = team;
                true
            }
            None => false,
        }
    }

    pub fn team_of(&self, player: PlayerHandle) -> Option<Team> {
        self.teams.get(&player).copied().flatten()
    }

    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            players: self
                .order
                .iter()
                .map(|&player| QueuedPlayer {
                    player,
                    team: self.team_of(player),
                })
                .collect(),
        }
    }

    pub fn contains(&self, player: PlayerHandle) -> bool {
        self.teams.contains_key(&player)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.teams.clear();
    }
}
