use crate::cell::Cell;
use crate::config::ScorebookConfig;
use crate::errors::{ScorebookError, ScorebookResult};
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lineup entry. Its batting-order number is its row index + 1.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Player {
    pub name: String,
    pub number: String,
    pub position: String,
}

impl Player {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn placeholder_name(row: usize) -> String {
        format!("Batter {}", row + 1)
    }
}

/// Which side of the game a scorecard belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TeamSide {
    Away,
    Home,
}

impl TeamSide {
    pub fn other(self) -> TeamSide {
        match self {
            TeamSide::Away => TeamSide::Home,
            TeamSide::Home => TeamSide::Away,
        }
    }

    /// Key the persistence collaborator files this side's snapshot under.
    pub fn store_key(self) -> &'static str {
        match self {
            TeamSide::Away => "team_away",
            TeamSide::Home => "team_home",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::str::FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "away" | "visitor" | "visitors" | "top" => Ok(TeamSide::Away),
            "home" | "bottom" => Ok(TeamSide::Home),
            other => Err(format!("unknown team side '{}'", other)),
        }
    }
}

/// One team's scorecard: name, lineup and grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub players: Vec<Player>,
    pub grid: Grid,
}

impl Team {
    /// A blank lineup of placeholder batters sized from the config.
    pub fn new(team_name: impl Into<String>, config: &ScorebookConfig) -> Self {
        Self {
            team_name: team_name.into(),
            players: (0..config.lineup_size)
                .map(|row| Player::named(Player::placeholder_name(row)))
                .collect(),
            grid: Grid::new(config.lineup_size, config.innings),
        }
    }

    /// Insert a player at `row` (clamped to the end) with an empty grid row.
    pub fn add_player(&mut self, row: usize, player: Player) -> usize {
        let at = row.min(self.players.len());
        self.players.insert(at, player);
        self.grid.insert_batter(at);
        at
    }

    pub fn remove_player(&mut self, row: usize) -> ScorebookResult<Player> {
        if row >= self.players.len() {
            return Err(ScorebookError::RowOutOfRange(row));
        }
        self.grid.remove_batter(row)?;
        Ok(self.players.remove(row))
    }

    pub fn snapshot(&self) -> TeamSnapshot {
        TeamSnapshot {
            team_name: self.team_name.clone(),
            players: self.players.clone(),
            grid: self.grid.rows().to_vec(),
            inning_outs: self.grid.inning_outs().to_vec(),
        }
    }

    /// Rebuild a team from a snapshot. Lineup and grid rows are padded to
    /// the longer of the two so no stored plate appearance is lost.
    pub fn from_snapshot(snapshot: TeamSnapshot, innings: usize) -> Self {
        let TeamSnapshot {
            team_name,
            mut players,
            mut grid,
            inning_outs,
        } = snapshot;

        let rows = players.len().max(grid.len());
        let mut row = players.len();
        players.resize_with(rows, || {
            row += 1;
            Player::named(Player::placeholder_name(row - 1))
        });
        grid.resize_with(rows, Vec::new);

        Self {
            team_name,
            players,
            grid: Grid::from_parts(grid, inning_outs, innings),
        }
    }
}

/// Persisted form of a [`Team`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamSnapshot {
    pub team_name: String,
    pub players: Vec<Player>,
    pub grid: Vec<Vec<Cell>>,
    pub inning_outs: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_round_trip_preserves_team() {
        let config = ScorebookConfig::default();
        let mut team = Team::new("Bears", &config);
        team.grid.record_out(2, 0).expect("cell exists");

        let restored = Team::from_snapshot(team.snapshot(), config.innings);
        assert_eq!(restored, team);
    }

    #[test]
    fn test_from_snapshot_pads_lineup_to_grid() {
        let snapshot = TeamSnapshot {
            team_name: "Owls".to_string(),
            players: vec![Player::named("Ada")],
            grid: vec![vec![], vec![], vec![]],
            inning_outs: vec![],
        };

        let team = Team::from_snapshot(snapshot, 9);
        let names: Vec<&str> = team.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Batter 2", "Batter 3"]);
        assert_eq!(team.grid.batter_count(), 3);
    }

    #[test]
    fn test_player_edits_keep_grid_in_step() {
        let mut team = Team::new("Bears", &ScorebookConfig::default());
        let at = team.add_player(100, Player::named("Late Sub"));
        assert_eq!(at, 9);
        assert_eq!(team.grid.batter_count(), 10);

        let removed = team.remove_player(0).expect("row 0 exists");
        assert_eq!(removed.name, "Batter 1");
        assert_eq!(team.grid.batter_count(), 9);
        assert_eq!(team.players.len(), 9);
    }

    #[test]
    fn test_team_side_parsing() {
        assert_eq!("Home".parse::<TeamSide>(), Ok(TeamSide::Home));
        assert_eq!("visitors".parse::<TeamSide>(), Ok(TeamSide::Away));
        assert!("middle".parse::<TeamSide>().is_err());
    }
}
