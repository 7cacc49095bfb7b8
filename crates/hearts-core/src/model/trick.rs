use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const PLAYS_PER_TRICK: usize = 4;

/// One round of play. Turn order is checked here; whether a card follows
/// suit is left to the player's selection rule.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: PlayerPosition,
    plays: Vec<Play>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub position: PlayerPosition,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrickError {
    #[error("trick already complete")]
    TrickComplete,
    #[error("expected {expected} to play next but got {actual}")]
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    #[error("{0} has already played this trick")]
    AlreadyPlayed(PlayerPosition),
}

impl Trick {
    pub fn new(leader: PlayerPosition) -> Self {
        Self {
            leader,
            plays: Vec::with_capacity(PLAYS_PER_TRICK),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.plays.iter().map(|play| play.card)
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYS_PER_TRICK
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|play| play.card.suit)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        self.check_turn(position)?;
        self.plays.push(Play { position, card });
        Ok(())
    }

    /// Whether `position` may play next, without recording anything.
    pub fn check_turn(&self, position: PlayerPosition) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        if self.plays.iter().any(|play| play.position == position) {
            return Err(TrickError::AlreadyPlayed(position));
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        Ok(())
    }

    /// Highest card of the lead suit; ranks are unique within a suit.
    pub fn winning_play(&self) -> Option<&Play> {
        if !self.is_complete() {
            return None;
        }
        let lead_suit = self.lead_suit()?;
        self.plays
            .iter()
            .filter(|play| play.card.suit == lead_suit)
            .max_by_key(|play| play.card.rank)
    }

    pub fn winner(&self) -> Option<PlayerPosition> {
        self.winning_play().map(|play| play.position)
    }

    pub fn penalty_total(&self) -> u32 {
        self.cards().map(Card::penalty_value).sum()
    }

    fn expected_position(&self) -> PlayerPosition {
        self.plays
            .last()
            .map(|play| play.position.next())
            .unwrap_or(self.leader)
    }
}

#[cfg(test)]
mod tests {
    use super::{Trick, TrickError};
    use crate::model::card::Card;
    use crate::model::player::PlayerPosition;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn plays_follow_turn_order() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert!(
            trick
                .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
                .is_ok()
        );
        assert!(matches!(
            trick.play(PlayerPosition::South, Card::new(Rank::Three, Suit::Clubs)),
            Err(TrickError::OutOfTurn { .. })
        ));
        assert_eq!(
            trick.play(PlayerPosition::North, Card::new(Rank::Four, Suit::Clubs)),
            Err(TrickError::AlreadyPlayed(PlayerPosition::North))
        );
    }

    #[test]
    fn check_turn_does_not_record_a_play() {
        let mut trick = Trick::new(PlayerPosition::East);
        assert_eq!(
            trick.check_turn(PlayerPosition::North),
            Err(TrickError::OutOfTurn {
                expected: PlayerPosition::East,
                actual: PlayerPosition::North,
            })
        );
        assert_eq!(trick.check_turn(PlayerPosition::East), Ok(()));
        assert!(trick.plays().is_empty());

        trick
            .play(PlayerPosition::East, Card::new(Rank::Six, Suit::Hearts))
            .unwrap();
        assert_eq!(
            trick.check_turn(PlayerPosition::East),
            Err(TrickError::AlreadyPlayed(PlayerPosition::East))
        );
        assert_eq!(trick.check_turn(PlayerPosition::South), Ok(()));
        assert_eq!(trick.plays().len(), 1);
    }

    #[test]
    fn fifth_play_is_rejected() {
        let mut trick = Trick::new(PlayerPosition::West);
        let ranks = [Rank::Two, Rank::Three, Rank::Four, Rank::Five];
        let mut seat = PlayerPosition::West;
        for rank in ranks {
            trick.play(seat, Card::new(rank, Suit::Diamonds)).unwrap();
            seat = seat.next();
        }
        assert!(trick.is_complete());
        assert_eq!(
            trick.play(seat, Card::new(Rank::Six, Suit::Diamonds)),
            Err(TrickError::TrickComplete)
        );
    }

    #[test]
    fn winner_is_highest_card_of_lead_suit() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Ten, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::Queen, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::South, Card::new(Rank::Four, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::Ace, Suit::Spades))
            .unwrap();

        assert_eq!(trick.lead_suit(), Some(Suit::Clubs));
        assert_eq!(trick.winner(), Some(PlayerPosition::East));
        assert_eq!(trick.penalty_total(), 0);
    }

    #[test]
    fn winner_counts_from_a_non_north_leader() {
        let mut trick = Trick::new(PlayerPosition::South);
        trick
            .play(PlayerPosition::South, Card::new(Rank::Five, Suit::Hearts))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::King, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::North, Card::new(Rank::Jack, Suit::Hearts))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::Three, Suit::Hearts))
            .unwrap();

        assert_eq!(trick.winner(), Some(PlayerPosition::North));
        assert_eq!(trick.penalty_total(), 3);
    }

    #[test]
    fn incomplete_trick_has_no_winner() {
        let mut trick = Trick::new(PlayerPosition::North);
        assert_eq!(trick.winner(), None);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Ace, Suit::Clubs))
            .unwrap();
        assert_eq!(trick.winner(), None);
    }

    #[test]
    fn queen_of_spades_counts_as_penalty() {
        let mut trick = Trick::new(PlayerPosition::North);
        trick
            .play(PlayerPosition::North, Card::new(Rank::Two, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::East, Card::new(Rank::Queen, Suit::Spades))
            .unwrap();
        trick
            .play(PlayerPosition::South, Card::new(Rank::Four, Suit::Clubs))
            .unwrap();
        trick
            .play(PlayerPosition::West, Card::new(Rank::Five, Suit::Clubs))
            .unwrap();

        assert_eq!(trick.penalty_total(), 13);
        assert_eq!(trick.winner(), Some(PlayerPosition::West));
    }
}
