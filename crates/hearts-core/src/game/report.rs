use super::engine::Game;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::trick::{Play, Trick};
use serde::{Deserialize, Serialize};

/// Serializable record of a hand: the deal, every trick and the scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub dealt: Vec<SeatHand>,
    pub tricks: Vec<TrickRecord>,
    pub scores: [u32; 4],
    pub leader: PlayerPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatHand {
    pub seat: PlayerPosition,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrickRecord {
    pub leader: PlayerPosition,
    pub plays: Vec<Play>,
    pub winner: Option<PlayerPosition>,
    pub penalties: u32,
}

impl From<&Trick> for TrickRecord {
    fn from(trick: &Trick) -> Self {
        Self {
            leader: trick.leader(),
            plays: trick.plays().to_vec(),
            winner: trick.winner(),
            penalties: trick.penalty_total(),
        }
    }
}

impl HandReport {
    pub fn capture(game: &Game) -> Self {
        let scores = game.scores();
        HandReport {
            seed: game.seed(),
            dealt: PlayerPosition::LOOP
                .iter()
                .map(|&seat| SeatHand {
                    seat,
                    cards: game.dealt_hand(seat).to_vec(),
                })
                .collect(),
            tricks: game.tricks().iter().map(TrickRecord::from).collect(),
            scores: *scores.standings(),
            leader: scores.leading_player(),
        }
    }

    pub fn to_json(game: &Game) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(game))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
