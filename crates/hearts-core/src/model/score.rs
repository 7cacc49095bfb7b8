use crate::model::player::{Player, PlayerPosition};

/// Penalty points per seat for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBoard {
    totals: [u32; 4],
}

impl ScoreBoard {
    pub const fn new() -> Self {
        Self { totals: [0; 4] }
    }

    pub fn from_players(players: &[Player]) -> Self {
        let mut board = Self::new();
        for player in players {
            board.set_score(player.position(), player.calculate_score());
        }
        board
    }

    pub fn set_score(&mut self, seat: PlayerPosition, points: u32) {
        self.totals[seat.index()] = points;
    }

    pub fn score(&self, seat: PlayerPosition) -> u32 {
        self.totals[seat.index()]
    }

    pub fn standings(&self) -> &[u32; 4] {
        &self.totals
    }

    pub fn total(&self) -> u32 {
        self.totals.iter().sum()
    }

    /// Lowest score; ties go to the earlier seat.
    pub fn leading_player(&self) -> PlayerPosition {
        PlayerPosition::LOOP
            .iter()
            .copied()
            .min_by_key(|seat| self.score(*seat))
            .unwrap_or(PlayerPosition::North)
    }
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new()
    }
}
