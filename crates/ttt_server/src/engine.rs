//! The command state machine.
//!
//! Each command is a load → validate → transform → persist pipeline with a
//! single persist exit point. The engine returns structured outcomes; turning
//! them into Slack messages is the presentation layer's job.

use derive_getters::Getters;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::error::CommandError;
use crate::game::{Game, MoveVerdict, PlayerRef, PlayerSlot};
use crate::guard::AdmissionGuard;
use crate::rng::FirstMoverPicker;
use crate::slack::MembershipResolver;
use crate::store::GameStore;

/// Result of a successful start: the freshly persisted game. The first
/// mover is the player at index 0.
#[derive(Debug, Clone, Getters)]
pub struct StartOutcome {
    /// The new game record.
    game: Game,
}

impl StartOutcome {
    /// The randomly chosen player who opens the game with X.
    pub fn first_mover(&self) -> &PlayerRef {
        self.game.player(PlayerSlot::First)
    }
}

/// Result of a successful play: the persisted post-move game and the
/// classified verdict.
#[derive(Debug, Clone, Getters)]
pub struct PlayOutcome {
    /// The game after the move.
    game: Game,
    /// Win, tie, or continue.
    verdict: MoveVerdict,
}

/// Executes commands against the channel's game.
///
/// Holds its collaborators as injected capabilities: the store, the
/// membership resolver, the first-mover picker, and the admission guard.
pub struct GameEngine {
    store: Arc<dyn GameStore>,
    resolver: Arc<dyn MembershipResolver>,
    first_mover: Arc<dyn FirstMoverPicker>,
    guard: AdmissionGuard,
    board_size: usize,
}

impl GameEngine {
    /// Creates an engine with a fresh admission guard.
    pub fn new(
        store: Arc<dyn GameStore>,
        resolver: Arc<dyn MembershipResolver>,
        first_mover: Arc<dyn FirstMoverPicker>,
        board_size: usize,
    ) -> Self {
        Self {
            store,
            resolver,
            first_mover,
            guard: AdmissionGuard::new(),
            board_size,
        }
    }

    /// Starts a new game between the challenger and the named opponent.
    ///
    /// The opponent must resolve to a member of the channel. The first
    /// mover is chosen by the injected picker and placed at index 0 with
    /// mark X. The admission guard closes the window between the
    /// no-existing-game check and the insert.
    ///
    /// # Errors
    ///
    /// [`SelfChallenge`](CommandError::SelfChallenge),
    /// [`InvalidOpponent`](CommandError::InvalidOpponent),
    /// [`AlreadyPlaying`](CommandError::AlreadyPlaying),
    /// [`CreationInProgress`](CommandError::CreationInProgress), or an
    /// operational membership/store fault.
    #[instrument(skip(self, challenger), fields(challenger = %challenger.name()))]
    pub async fn start(
        &self,
        team_id: &str,
        channel_id: &str,
        challenger: PlayerRef,
        opponent_name: &str,
    ) -> Result<StartOutcome, CommandError> {
        if challenger.name() == opponent_name {
            return Err(CommandError::SelfChallenge);
        }

        let opponent_id = self
            .resolver
            .resolve_opponent(opponent_name, channel_id)
            .await?
            .ok_or_else(|| CommandError::InvalidOpponent {
                name: opponent_name.to_string(),
            })?;
        let opponent = PlayerRef::new(opponent_id, opponent_name.to_string());

        if self.store.find_started(team_id, channel_id)?.is_some() {
            warn!(team_id, channel_id, "Game already started in this channel");
            return Err(CommandError::AlreadyPlaying);
        }

        // Marker held from here until the insert attempt completes.
        let _permit = self
            .guard
            .acquire(team_id, channel_id)
            .ok_or(CommandError::CreationInProgress)?;

        let start_player = challenger.name().clone();
        let (first, second) = if self.first_mover.challenger_first() {
            (challenger, opponent)
        } else {
            (opponent, challenger)
        };

        let game = Game::new(
            team_id.to_string(),
            channel_id.to_string(),
            start_player,
            first,
            second,
            self.board_size,
        );
        let game = self.store.insert(game)?;

        info!(
            team_id,
            channel_id,
            game_id = ?game.id(),
            first_mover = %game.player(PlayerSlot::First).name(),
            "Game started"
        );
        Ok(StartOutcome { game })
    }

    /// Plays the actor's mark at the given cell.
    ///
    /// The post-move record is persisted unconditionally, whether the move
    /// won, tied, or merely advanced the turn.
    ///
    /// # Errors
    ///
    /// [`GameNotFound`](CommandError::GameNotFound),
    /// [`NotAPlayer`](CommandError::NotAPlayer),
    /// [`NotYourTurn`](CommandError::NotYourTurn),
    /// [`InvalidMove`](CommandError::InvalidMove), or a store fault. All
    /// validation failures leave the persisted game unchanged.
    #[instrument(skip(self))]
    pub fn play(
        &self,
        team_id: &str,
        channel_id: &str,
        actor: &str,
        cell: usize,
    ) -> Result<PlayOutcome, CommandError> {
        let mut game = self
            .store
            .find_started(team_id, channel_id)?
            .ok_or(CommandError::GameNotFound)?;

        let slot = game.slot_of(actor).ok_or_else(|| CommandError::NotAPlayer {
            players: game.players().clone(),
        })?;
        if slot != game.turn() {
            return Err(CommandError::NotYourTurn {
                expected: game.current_player().clone(),
            });
        }

        let verdict = game.play_cell(cell).map_err(CommandError::InvalidMove)?;
        self.store.update(&game)?;

        info!(
            team_id,
            channel_id,
            actor,
            cell,
            verdict = ?verdict,
            "Move recorded"
        );
        Ok(PlayOutcome { game, verdict })
    }

    /// Returns the channel's running game for a status view.
    ///
    /// # Errors
    ///
    /// [`GameNotFound`](CommandError::GameNotFound) or a store fault.
    #[instrument(skip(self))]
    pub fn status(&self, team_id: &str, channel_id: &str) -> Result<Game, CommandError> {
        self.store
            .find_started(team_id, channel_id)?
            .ok_or(CommandError::GameNotFound)
    }

    /// Returns the channel's running game for a history view. Read-only,
    /// like [`status`](GameEngine::status); the move list rides on the
    /// record itself.
    ///
    /// # Errors
    ///
    /// [`GameNotFound`](CommandError::GameNotFound) or a store fault.
    #[instrument(skip(self))]
    pub fn history(&self, team_id: &str, channel_id: &str) -> Result<Game, CommandError> {
        self.store
            .find_started(team_id, channel_id)?
            .ok_or(CommandError::GameNotFound)
    }

    /// Ends the channel's game without a result.
    ///
    /// # Errors
    ///
    /// [`GameNotFound`](CommandError::GameNotFound),
    /// [`NotAPlayer`](CommandError::NotAPlayer), or a store fault.
    #[instrument(skip(self))]
    pub fn end(
        &self,
        team_id: &str,
        channel_id: &str,
        actor: &str,
    ) -> Result<Game, CommandError> {
        let mut game = self
            .store
            .find_started(team_id, channel_id)?
            .ok_or(CommandError::GameNotFound)?;

        game.slot_of(actor).ok_or_else(|| CommandError::NotAPlayer {
            players: game.players().clone(),
        })?;

        game.finish_no_result();
        self.store.update(&game)?;

        info!(team_id, channel_id, actor, "Game ended without result");
        Ok(game)
    }
}
