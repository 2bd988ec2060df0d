//! Presentation layer: structured outcomes and errors become Slack messages.
//!
//! The engine never formats text; everything user-visible is assembled here
//! from the locale catalog, the board renderer, and the outcome structures.

use crate::engine::{PlayOutcome, StartOutcome};
use crate::error::CommandError;
use crate::game::{Game, MoveVerdict, PlayerSlot};
use crate::locales::Locale;
use crate::render::draw;
use crate::slack::{user_display, Attachment, SlackResponse, SlashRequest};

/// Sidebar color for success messages.
pub const GREEN: &str = "#36a64f";
/// Sidebar color for error messages.
pub const RED: &str = "#ff0000";
/// Sidebar color for plain help.
pub const ORANGE: &str = "#ff9900";

const UTC_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Fills successive `%s` placeholders in a label.
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut args = args.iter();
    while let Some(idx) = rest.find("%s") {
        out.push_str(&rest[..idx]);
        out.push_str(args.next().copied().unwrap_or("%s"));
        rest = &rest[idx + 2..];
    }
    out.push_str(rest);
    out
}

/// The help message, optionally led by an error note (invalid command or
/// malformed arguments).
pub fn help(locale: &Locale, error: Option<&str>) -> SlackResponse {
    let (text, color) = match error {
        Some(message) => (message.to_string(), RED),
        None => (locale.help.cmd_text.to_string(), ORANGE),
    };
    SlackResponse::ephemeral(text).with_attachment(
        Attachment::new(locale.help.usage_text, color).with_title(locale.help.usage_title),
    )
}

/// Announces a new game: the challenge line, the mark assignments, the
/// first mover, and the empty board.
pub fn start_ok(locale: &Locale, outcome: &StartOutcome) -> SlackResponse {
    let game = outcome.game();
    let first = game.player(PlayerSlot::First);
    let second = game.player(PlayerSlot::Second);
    let (challenger, challenged) = if first.name() == game.start_player() {
        (first, second)
    } else {
        (second, first)
    };

    let detail = format!(
        "{}\n`X` -> {}\n`O` -> {}\nFirst move by: {}\n{}",
        fill(
            locale.start.cmd_detail_text,
            &[&user_display(challenger), &user_display(challenged)],
        ),
        user_display(first),
        user_display(second),
        user_display(first),
        draw(game.board(), None),
    );

    SlackResponse::in_channel(locale.start.cmd_text)
        .with_attachment(Attachment::new(detail, GREEN))
}

/// Announces a move: win, tie, or whose turn is next, with the board.
pub fn play_ok(locale: &Locale, outcome: &PlayOutcome) -> SlackResponse {
    let game = outcome.game();
    match outcome.verdict() {
        MoveVerdict::Won(line) => {
            // On a win the turn does not advance; the current player is the
            // winner.
            let winner = user_display(game.current_player());
            SlackResponse::in_channel(fill(locale.play.win_text, &[&winner]))
                .with_attachment(Attachment::new(draw(game.board(), Some(line)), GREEN))
        }
        MoveVerdict::Tie => SlackResponse::in_channel(locale.play.tie_text)
            .with_attachment(Attachment::new(draw(game.board(), None), GREEN)),
        MoveVerdict::Continue => {
            let mover = user_display(game.player(game.turn().other()));
            let next = user_display(game.current_player());
            SlackResponse::in_channel(fill(locale.play.next_turn_text, &[&mover, &next]))
                .with_attachment(Attachment::new(draw(game.board(), None), GREEN))
        }
    }
}

/// The status view: participants, whose turn it is, and the board.
pub fn status_ok(locale: &Locale, game: &Game) -> SlackResponse {
    let body = format!(
        "{}\n{}",
        fill(
            locale.status.cmd_status_text,
            &[
                &user_display(game.player(PlayerSlot::First)),
                &user_display(game.player(PlayerSlot::Second)),
                &user_display(game.current_player()),
            ],
        ),
        draw(game.board(), None),
    );
    SlackResponse::ephemeral(locale.status.cmd_text)
        .with_attachment(Attachment::new(body, GREEN))
}

/// The history view: every ply numbered in order, then whose turn it is and
/// the board.
pub fn history_ok(locale: &Locale, game: &Game) -> SlackResponse {
    let text = fill(
        locale.history.cmd_status_text,
        &[
            &user_display(game.player(PlayerSlot::First)),
            &user_display(game.player(PlayerSlot::Second)),
        ],
    );

    let mut lines = String::new();
    for (i, entry) in game.history().iter().enumerate() {
        // Plies strictly alternate starting with the player in slot 0.
        let slot = if i % 2 == 0 {
            PlayerSlot::First
        } else {
            PlayerSlot::Second
        };
        lines.push_str(&format!(
            "{}. {} placed an `{}` at location `{}` at `{}`\n",
            i + 1,
            user_display(game.player(slot)),
            slot.mark(),
            entry.cell(),
            entry.played_at().format(UTC_FORMAT),
        ));
    }
    if game.history().is_empty() {
        lines = locale.history.history_not_found_error.to_string();
    }

    let body = format!(
        "{}\n{}\n{}",
        lines,
        fill(
            locale.history.cmd_status_turn_text,
            &[&user_display(game.current_player())],
        ),
        draw(game.board(), None),
    );
    SlackResponse::ephemeral(text).with_attachment(Attachment::new(body, GREEN))
}

/// Announces the game was ended without a result.
pub fn end_ok(locale: &Locale, game: &Game) -> SlackResponse {
    SlackResponse::in_channel(fill(
        locale.end.cmd_success,
        &[
            &user_display(game.player(PlayerSlot::First)),
            &user_display(game.player(PlayerSlot::Second)),
        ],
    ))
}

/// The play response for a non-numeric move argument.
pub fn play_move_arg_error(locale: &Locale) -> SlackResponse {
    SlackResponse::ephemeral(locale.play.move_error).with_attachment(
        Attachment::new(locale.help.usage_text, RED).with_title(locale.help.usage_title),
    )
}

/// Maps a start failure to its user message.
pub fn start_error(locale: &Locale, req: &SlashRequest, err: &CommandError) -> SlackResponse {
    match err {
        CommandError::SelfChallenge => help(locale, Some(locale.start.same_user_error)),
        CommandError::InvalidOpponent { name } => {
            SlackResponse::ephemeral(locale.start.user_error).with_attachment(Attachment::new(
                fill(
                    locale.start.user_detail_error,
                    &[name, &req.channel_id, &req.channel_name],
                ),
                RED,
            ))
        }
        CommandError::AlreadyPlaying => SlackResponse::ephemeral(locale.start.user_error)
            .with_attachment(Attachment::new(locale.start.game_start_error, RED)),
        CommandError::CreationInProgress => SlackResponse::ephemeral(locale.start.user_error)
            .with_attachment(Attachment::new(locale.start.game_sync_error, RED)),
        CommandError::Membership(_) => SlackResponse::ephemeral(locale.start.channel_error)
            .with_attachment(Attachment::new(locale.start.channel_detail_error, RED)),
        _ => SlackResponse::ephemeral(locale.start.db_error),
    }
}

/// Maps a play failure to its user message.
pub fn play_error(locale: &Locale, err: &CommandError) -> SlackResponse {
    match err {
        CommandError::GameNotFound => {
            SlackResponse::ephemeral(locale.play.game_not_found_error)
        }
        CommandError::NotAPlayer { players } => {
            SlackResponse::ephemeral(locale.play.user_error).with_attachment(Attachment::new(
                fill(
                    locale.play.user_detail_error,
                    &[&user_display(&players[0]), &user_display(&players[1])],
                ),
                RED,
            ))
        }
        CommandError::NotYourTurn { expected } => SlackResponse::ephemeral(
            locale.play.user_error,
        )
        .with_attachment(Attachment::new(
            fill(locale.play.turn_error, &[&user_display(expected)]),
            RED,
        )),
        CommandError::InvalidMove(_) => SlackResponse::ephemeral(locale.play.cmd_error)
            .with_attachment(Attachment::new(locale.play.cmd_detail_error, RED)),
        _ => SlackResponse::ephemeral(locale.play.db_error),
    }
}

/// Maps a status failure to its user message.
pub fn status_error(locale: &Locale, err: &CommandError) -> SlackResponse {
    match err {
        CommandError::GameNotFound => {
            SlackResponse::ephemeral(locale.status.game_not_found_error)
        }
        _ => SlackResponse::ephemeral(locale.status.db_error),
    }
}

/// Maps a history failure to its user message.
pub fn history_error(locale: &Locale, err: &CommandError) -> SlackResponse {
    match err {
        CommandError::GameNotFound => {
            SlackResponse::ephemeral(locale.history.game_not_found_error)
        }
        _ => SlackResponse::ephemeral(locale.history.db_error),
    }
}

/// Maps an end failure to its user message.
pub fn end_error(locale: &Locale, err: &CommandError) -> SlackResponse {
    match err {
        CommandError::GameNotFound => {
            SlackResponse::ephemeral(locale.end.game_not_found_error)
        }
        CommandError::NotAPlayer { players } => {
            SlackResponse::ephemeral(locale.end.cmd_error).with_attachment(Attachment::new(
                fill(
                    locale.end.cmd_detail_error,
                    &[&user_display(&players[0]), &user_display(&players[1])],
                ),
                RED,
            ))
        }
        _ => SlackResponse::ephemeral(locale.end.db_error),
    }
}
