use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use thiserror::Error;

pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("requested {requested} cards but only {remaining} remain in the deck")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("malformed deck: {reason}")]
    Malformed { reason: String },
}

/// Undealt cards, in the order they will be dealt.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds the full deck and shuffles it with `rng`.
    pub fn new<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    /// Suit-major, rank-ascending order with no shuffle applied.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::new(&mut rng)
    }

    /// Uses `cards` as the deal order after checking it is a complete deck.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, DeckError> {
        let deck = Self { cards };
        deck.validate()?;
        Ok(deck)
    }

    pub fn validate(&self) -> Result<(), DeckError> {
        if self.cards.len() != DECK_SIZE {
            return Err(DeckError::Malformed {
                reason: format!("expected {DECK_SIZE} cards, found {}", self.cards.len()),
            });
        }
        let mut seen = HashSet::with_capacity(DECK_SIZE);
        for card in &self.cards {
            if !seen.insert(*card) {
                return Err(DeckError::Malformed {
                    reason: format!("duplicate card {card}"),
                });
            }
        }
        Ok(())
    }

    /// Fisher-Yates over the remaining cards.
    pub fn shuffle<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Removes the first `count` cards. Fails without touching the deck when
    /// fewer than `count` remain.
    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if count > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: count,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..count).collect())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
