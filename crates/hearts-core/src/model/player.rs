use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    #[error("{0} has no cards left to play")]
    EmptyHand(PlayerPosition),
}

/// A seated, non-interactive player: the cards it still holds and the
/// cards it has taken in tricks.
#[derive(Debug, Clone)]
pub struct Player {
    position: PlayerPosition,
    hand: Hand,
    points_pile: Vec<Card>,
}

impl Player {
    pub fn new(position: PlayerPosition) -> Self {
        Self {
            position,
            hand: Hand::new(),
            points_pile: Vec::new(),
        }
    }

    pub fn position(&self) -> PlayerPosition {
        self.position
    }

    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn points_pile(&self) -> &[Card] {
        &self.points_pile
    }

    pub fn receive_card(&mut self, card: Card) {
        self.hand.add(card);
    }

    pub fn set_hand(&mut self, cards: Vec<Card>) {
        self.hand = Hand::with_cards(cards);
    }

    /// Follows `lead_suit` with the first matching card in hand order when
    /// possible, otherwise plays the first card held.
    pub fn play_card(&mut self, lead_suit: Option<Suit>) -> Result<Card, PlayerError> {
        let index = lead_suit
            .and_then(|suit| self.hand.first_of_suit(suit))
            .unwrap_or(0);
        self.hand
            .take(index)
            .ok_or(PlayerError::EmptyHand(self.position))
    }

    pub fn collect_trick<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = Card>,
    {
        self.points_pile.extend(cards);
    }

    /// One point per heart taken, plus 13 for the queen of spades.
    pub fn calculate_score(&self) -> u32 {
        self.points_pile.iter().map(|card| card.penalty_value()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::{Player, PlayerError, PlayerPosition};
    use crate::model::card::Card;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
        assert_eq!(PlayerPosition::North.next(), PlayerPosition::East);
    }

    #[test]
    fn index_follows_loop_order() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(seat.index(), i);
        }
    }

    #[test]
    fn follows_lead_suit_with_first_match() {
        let mut player = Player::new(PlayerPosition::East);
        player.set_hand(vec![
            card(Rank::Ace, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Two, Suit::Diamonds),
        ]);
        let played = player.play_card(Some(Suit::Diamonds)).unwrap();
        assert_eq!(played, card(Rank::Nine, Suit::Diamonds));
        assert_eq!(player.hand().len(), 2);
        assert!(!player.hand().contains(played));
    }

    #[test]
    fn discards_first_card_when_void() {
        let mut player = Player::new(PlayerPosition::South);
        player.set_hand(vec![
            card(Rank::Queen, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ]);
        assert_eq!(
            player.play_card(Some(Suit::Clubs)).unwrap(),
            card(Rank::Queen, Suit::Spades)
        );
    }

    #[test]
    fn leads_first_card_without_lead_suit() {
        let mut player = Player::new(PlayerPosition::North);
        player.receive_card(card(Rank::Five, Suit::Hearts));
        player.receive_card(card(Rank::Two, Suit::Clubs));
        assert_eq!(
            player.play_card(None).unwrap(),
            card(Rank::Five, Suit::Hearts)
        );
    }

    #[test]
    fn empty_hand_is_an_error() {
        let mut player = Player::new(PlayerPosition::West);
        assert_eq!(
            player.play_card(None),
            Err(PlayerError::EmptyHand(PlayerPosition::West))
        );
    }

    #[test]
    fn set_hand_replaces_previous_cards() {
        let mut player = Player::new(PlayerPosition::North);
        player.receive_card(card(Rank::Two, Suit::Clubs));
        player.set_hand(vec![card(Rank::Three, Suit::Diamonds)]);
        assert_eq!(player.hand().cards(), &[card(Rank::Three, Suit::Diamonds)]);
    }

    #[test]
    fn score_counts_hearts_and_queen_of_spades() {
        let mut player = Player::new(PlayerPosition::North);
        assert_eq!(player.calculate_score(), 0);

        player.collect_trick([
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Hearts),
            card(Rank::Queen, Suit::Spades),
            card(Rank::Ace, Suit::Hearts),
        ]);
        assert_eq!(player.points_pile().len(), 4);
        assert_eq!(player.calculate_score(), 15);
    }

    #[test]
    fn score_is_zero_without_penalty_cards() {
        let mut player = Player::new(PlayerPosition::East);
        player.collect_trick([
            card(Rank::Queen, Suit::Clubs),
            card(Rank::King, Suit::Spades),
            card(Rank::Queen, Suit::Diamonds),
            card(Rank::Ace, Suit::Spades),
        ]);
        assert_eq!(player.calculate_score(), 0);
    }
}
