//! Command failure taxonomy.

use derive_more::{Display, Error};
use ttt_core::PlaceError;

use crate::game::PlayerRef;
use crate::slack::MembershipError;
use crate::store::StoreError;

/// Everything a command can fail with.
///
/// All variants are plain return values; nothing panics across the engine
/// boundary. Most variants are business outcomes translated into user
/// guidance by the presentation layer; only [`Store`](CommandError::Store)
/// and [`Membership`](CommandError::Membership) are operational faults that
/// get logged as errors.
#[derive(Debug, Clone, Display, Error)]
pub enum CommandError {
    /// A `Started` game already exists in the channel.
    #[display("a game is already being played in this channel")]
    AlreadyPlaying,
    /// Another start command currently holds the channel's creation marker.
    #[display("a game is already being created in this channel")]
    CreationInProgress,
    /// The challenger named themselves as the opponent.
    #[display("you cannot play the game with yourself")]
    SelfChallenge,
    /// The challenged name could not be resolved to a channel member.
    #[display("'{name}' is not a member of this channel")]
    InvalidOpponent {
        /// The name that failed to resolve.
        name: String,
    },
    /// No `Started` game exists in the channel.
    #[display("no game is being played in this channel")]
    GameNotFound,
    /// The actor is not one of the two participants.
    #[display("only players of this game can run this command")]
    NotAPlayer {
        /// The two participants, for the guidance message.
        #[error(not(source))]
        players: [PlayerRef; 2],
    },
    /// The actor is a participant but it is not their turn.
    #[display("it is {}'s turn", expected.name())]
    NotYourTurn {
        /// The player whose move it actually is.
        #[error(not(source))]
        expected: PlayerRef,
    },
    /// The requested cell is out of range or occupied.
    #[display("invalid move: {_0}")]
    InvalidMove(#[error(not(source))] PlaceError),
    /// The membership lookup itself failed.
    #[display("{_0}")]
    Membership(MembershipError),
    /// A persistence operation failed.
    #[display("{_0}")]
    Store(StoreError),
}

impl CommandError {
    /// True for faults to be logged as operational errors; business
    /// outcomes return false.
    pub fn is_operational(&self) -> bool {
        matches!(self, CommandError::Membership(_) | CommandError::Store(_))
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        CommandError::Store(err)
    }
}

impl From<MembershipError> for CommandError {
    fn from(err: MembershipError) -> Self {
        CommandError::Membership(err)
    }
}
