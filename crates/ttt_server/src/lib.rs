//! Slack slash-command tic-tac-toe server.
//!
//! One game per channel, driven by stateless `/ttt` commands:
//!
//! - **Engine**: the command state machine (start/play/status/history/end)
//! - **Store**: game persistence behind a trait, SQLite or in-memory
//! - **Guard**: per-channel admission control for concurrent starts
//! - **Slack**: slash-command payloads and the Web API membership check
//! - **Router**: the axum HTTP surface with request validation
//!
//! Game rules themselves live in the `ttt_core` crate.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod engine;
mod error;
mod game;
mod guard;
mod render;
mod rng;
mod router;
mod slack;
mod store;

// Message catalogs and presentation are namespaced: callers use
// `locales::get` and the `respond` builders directly.
pub mod locales;
pub mod respond;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, SlackConfig, COMMAND_NAME};

// Crate-level exports - Command engine
pub use engine::{GameEngine, PlayOutcome, StartOutcome};
pub use error::CommandError;

// Crate-level exports - Game record
pub use game::{
    Game, GameIntegrityError, GameState, HistoryEntry, MoveVerdict, PlayerRef, PlayerSlot,
};

// Crate-level exports - Admission guard
pub use guard::{AdmissionGuard, AdmissionPermit};

// Crate-level exports - Rendering
pub use render::draw;

// Crate-level exports - First-mover selection
pub use rng::{FirstMoverPicker, FixedFirstMover, RandomFirstMover};

// Crate-level exports - HTTP surface
pub use router::{router, AppState};

// Crate-level exports - Slack integration
pub use slack::{
    user_display, Attachment, MembershipError, MembershipResolver, ResponseType,
    SlackClient, SlackResponse, SlashRequest,
};

// Crate-level exports - Persistence
pub use store::{GameStore, MemoryStore, SqliteStore, StoreError};
