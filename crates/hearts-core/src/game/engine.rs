use crate::model::card::Card;
use crate::model::deck::{Deck, DeckError};
use crate::model::player::{Player, PlayerError, PlayerPosition};
use crate::model::score::ScoreBoard;
use crate::model::trick::{Trick, TrickError};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::array;
use thiserror::Error;
use tracing::{Level, event};

pub const PLAYER_COUNT: usize = 4;
pub const TRICKS_PER_HAND: usize = 13;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("deal failed: {0}")]
    Deck(#[from] DeckError),
    #[error("play failed: {0}")]
    Player(#[from] PlayerError),
    #[error("trick rejected a play: {0}")]
    Trick(#[from] TrickError),
    #[error("this hand has already been played")]
    AlreadyPlayed,
    #[error("trick {trick} finished without a winner")]
    Unresolved { trick: usize },
}

/// A single hand of Hearts between four automatic players.
///
/// Construction shuffles and deals; [`Game::play`] runs all thirteen tricks.
/// Scores are read afterwards from [`Game::players`] or [`Game::scores`].
#[derive(Debug, Clone)]
pub struct Game {
    deck: Deck,
    players: Vec<Player>,
    dealt_hands: [Vec<Card>; PLAYER_COUNT],
    tricks: Vec<Trick>,
    seed: Option<u64>,
}

impl Game {
    /// Shuffles with a fresh random seed, which is kept for reporting.
    pub fn new() -> Result<Self, GameError> {
        let seed: u64 = rand::random();
        Self::with_seed(seed)
    }

    pub fn with_seed(seed: u64) -> Result<Self, GameError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = Self::with_rng(&mut rng)?;
        game.seed = Some(seed);
        Ok(game)
    }

    pub fn with_rng<R: rand::Rng + ?Sized>(rng: &mut R) -> Result<Self, GameError> {
        Self::with_deck(Deck::new(rng))
    }

    /// Deals `deck` as-is. The deck must still hold all 52 cards.
    pub fn with_deck(mut deck: Deck) -> Result<Self, GameError> {
        deck.validate()?;
        let dealt = deck.deal(deck.len())?;
        let per_player = dealt.len() / PLAYER_COUNT;

        let mut players: Vec<Player> = PlayerPosition::LOOP
            .iter()
            .copied()
            .map(Player::new)
            .collect();
        let dealt_hands: [Vec<Card>; PLAYER_COUNT] = array::from_fn(|seat| {
            let start = seat * per_player;
            dealt[start..start + per_player].to_vec()
        });
        for (player, block) in players.iter_mut().zip(dealt_hands.iter()) {
            player.set_hand(block.clone());
        }

        Ok(Self {
            deck,
            players,
            dealt_hands,
            tricks: Vec::with_capacity(TRICKS_PER_HAND),
            seed: None,
        })
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: PlayerPosition) -> &Player {
        &self.players[seat.index()]
    }

    /// The cards `seat` was dealt, in deal order.
    pub fn dealt_hand(&self, seat: PlayerPosition) -> &[Card] {
        &self.dealt_hands[seat.index()]
    }

    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }

    pub fn is_complete(&self) -> bool {
        self.tricks.len() == TRICKS_PER_HAND
    }

    pub fn scores(&self) -> ScoreBoard {
        ScoreBoard::from_players(&self.players)
    }

    /// Cards still in the deck plus every hand and points pile.
    pub fn cards_accounted_for(&self) -> usize {
        self.deck.len()
            + self
                .players
                .iter()
                .map(|player| player.hand().len() + player.points_pile().len())
                .sum::<usize>()
    }

    /// Plays all thirteen tricks. North leads the first; each winner leads
    /// the next.
    pub fn play(&mut self) -> Result<(), GameError> {
        if !self.tricks.is_empty() {
            return Err(GameError::AlreadyPlayed);
        }

        let mut leader = PlayerPosition::North;
        for trick_index in 0..TRICKS_PER_HAND {
            let trick = self.play_trick(leader)?;
            let winner = trick
                .winner()
                .ok_or(GameError::Unresolved { trick: trick_index })?;
            self.players[winner.index()].collect_trick(trick.cards());

            if tracing::enabled!(Level::DEBUG) {
                let cards = trick
                    .plays()
                    .iter()
                    .map(|play| format!("{}:{}", play.position, play.card.short()))
                    .collect::<Vec<_>>()
                    .join(",");
                event!(
                    target: "hearts_core::game",
                    Level::DEBUG,
                    trick = trick_index as u32,
                    leader = %leader,
                    winner = %winner,
                    cards = %cards,
                    penalties = trick.penalty_total()
                );
            }

            self.tricks.push(trick);
            leader = winner;
        }

        if tracing::enabled!(Level::INFO) {
            let scores = self.scores();
            event!(
                target: "hearts_core::game",
                Level::INFO,
                seed = ?self.seed,
                north = scores.score(PlayerPosition::North),
                east = scores.score(PlayerPosition::East),
                south = scores.score(PlayerPosition::South),
                west = scores.score(PlayerPosition::West),
                "hand complete"
            );
        }

        Ok(())
    }

    fn play_trick(&mut self, leader: PlayerPosition) -> Result<Trick, GameError> {
        if let Some(player) = self.players.iter().find(|player| player.hand().is_empty()) {
            return Err(PlayerError::EmptyHand(player.position()).into());
        }

        let mut trick = Trick::new(leader);
        let mut seat = leader;
        for _ in 0..PLAYER_COUNT {
            // Checked before the card leaves the hand.
            trick.check_turn(seat)?;
            let card = self.players[seat.index()].play_card(trick.lead_suit())?;
            trick.play(seat, card)?;
            seat = seat.next();
        }
        Ok(trick)
    }
}
