//! Localized message catalogs.
//!
//! Labels use `%s` placeholders filled positionally by the presentation
//! layer. Only US English ships today; the catalog is selected by config so
//! another locale is a new constant, not a code change.

/// Labels for the start command.
#[derive(Debug, Clone, Copy)]
pub struct StartLabels {
    /// Generic persistence failure.
    pub db_error: &'static str,
    /// Membership lookup failed outright.
    pub channel_error: &'static str,
    /// Detail line for the membership failure.
    pub channel_detail_error: &'static str,
    /// Lead line when the game cannot start.
    pub user_error: &'static str,
    /// Detail: the challenged name is not in the channel.
    pub user_detail_error: &'static str,
    /// Challenger named themselves.
    pub same_user_error: &'static str,
    /// A game is already running here.
    pub game_start_error: &'static str,
    /// A game is being created here right now.
    pub game_sync_error: &'static str,
    /// Lead line of the success message.
    pub cmd_text: &'static str,
    /// Detail line of the success message.
    pub cmd_detail_text: &'static str,
}

/// Labels for the play command.
#[derive(Debug, Clone, Copy)]
pub struct PlayLabels {
    /// Generic persistence failure.
    pub db_error: &'static str,
    /// No running game in the channel.
    pub game_not_found_error: &'static str,
    /// The move argument was not a number.
    pub move_error: &'static str,
    /// Lead line when the actor may not move.
    pub user_error: &'static str,
    /// Detail: only the two players may move.
    pub user_detail_error: &'static str,
    /// It is the other player's turn.
    pub turn_error: &'static str,
    /// Lead line for an illegal move.
    pub cmd_error: &'static str,
    /// Detail line for an illegal move.
    pub cmd_detail_error: &'static str,
    /// Someone won.
    pub win_text: &'static str,
    /// The board filled up.
    pub tie_text: &'static str,
    /// Move accepted, next player's turn.
    pub next_turn_text: &'static str,
}

/// Labels for the status command.
#[derive(Debug, Clone, Copy)]
pub struct StatusLabels {
    /// Generic persistence failure.
    pub db_error: &'static str,
    /// No running game in the channel.
    pub game_not_found_error: &'static str,
    /// Lead line.
    pub cmd_text: &'static str,
    /// Status body.
    pub cmd_status_text: &'static str,
}

/// Labels for the history command.
#[derive(Debug, Clone, Copy)]
pub struct HistoryLabels {
    /// Generic persistence failure.
    pub db_error: &'static str,
    /// No running game in the channel.
    pub game_not_found_error: &'static str,
    /// No moves made yet.
    pub history_not_found_error: &'static str,
    /// Status body.
    pub cmd_status_text: &'static str,
    /// Whose turn it is line.
    pub cmd_status_turn_text: &'static str,
}

/// Labels for the end command.
#[derive(Debug, Clone, Copy)]
pub struct EndLabels {
    /// Generic persistence failure.
    pub db_error: &'static str,
    /// No running game in the channel.
    pub game_not_found_error: &'static str,
    /// Lead line when the actor may not end the game.
    pub cmd_error: &'static str,
    /// Detail: only the two players may end it.
    pub cmd_detail_error: &'static str,
    /// Success message.
    pub cmd_success: &'static str,
}

/// Labels for the help command.
#[derive(Debug, Clone, Copy)]
pub struct HelpLabels {
    /// Introductory help text.
    pub cmd_text: &'static str,
    /// Invalid command note.
    pub invalid_command: &'static str,
    /// Usage attachment title.
    pub usage_title: &'static str,
    /// Usage attachment body.
    pub usage_text: &'static str,
}

/// Full message catalog for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Locale {
    /// Start command labels.
    pub start: StartLabels,
    /// Play command labels.
    pub play: PlayLabels,
    /// Status command labels.
    pub status: StatusLabels,
    /// History command labels.
    pub history: HistoryLabels,
    /// End command labels.
    pub end: EndLabels,
    /// Help command labels.
    pub help: HelpLabels,
}

/// Supported locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
pub enum LocaleTag {
    /// US English.
    #[strum(serialize = "US_EN")]
    UsEn,
}

/// Returns the catalog for a locale tag.
pub fn get(tag: LocaleTag) -> &'static Locale {
    match tag {
        LocaleTag::UsEn => &US_EN,
    }
}

const USAGE_TEXT: &str = "1. Start a game with another user using `/ttt start \
@username`. This will randomly pick a player to make the first move.\n\
2. To make a move at board cell 'index' in the ongoing game, enter `/ttt play <index>`\n\
3. Want to get the status of the game? Enter `/ttt status`\n\
4. Who played what? When? Enter `/ttt history`\n\
5. End the game using `/ttt end`\n\
6. Stuck? Need help? Enter `/ttt help`";

/// US English catalog.
pub static US_EN: Locale = Locale {
    start: StartLabels {
        db_error: "Something went wrong! Please try again later.",
        channel_error: "Unable to start the game!",
        channel_detail_error: "Please run this command from a valid channel",
        user_error: "Unable to start the game!",
        user_detail_error: "Invalid username given!! `@%s` is not a member of <#%s|%s>",
        same_user_error: "You cannot play the game with yourself!",
        game_start_error: "Game already started in this channel!",
        game_sync_error: "Game being created in this channel!",
        cmd_text: "New Game started in this channel!",
        cmd_detail_text: "%s has challenged %s to a new game.",
    },
    play: PlayLabels {
        db_error: "Something went wrong! Please try again later.",
        game_not_found_error: "No game is being played in this channel!\nStart a game using `/ttt start @username`",
        move_error: "Invalid move! <index> should be a valid number.",
        user_error: "You are not allowed to make a move!",
        user_detail_error: "Only players of this game (%s and %s) can play the game!",
        turn_error: "Patience! It is %s's turn!",
        cmd_error: "That is an invalid move!",
        cmd_detail_error: "Please make your move in one of the available cells, using `/ttt play <index>`",
        win_text: "Game over! %s has won this game! :thumbsup:",
        tie_text: "Game over! We have a TIE",
        next_turn_text: "Well done %s :thumbsup:\n It is now %s's turn!",
    },
    status: StatusLabels {
        db_error: "Something went wrong! Please try again later.",
        game_not_found_error: "No game is being played in this channel!\nStart a game using `/ttt start @username`",
        cmd_text: "Game status:",
        cmd_status_text: "Game is currently being played between %s and %s\nIt is now %s's turn!",
    },
    history: HistoryLabels {
        db_error: "Something went wrong! Please try again later.",
        game_not_found_error: "No game is being played in this channel!\nStart a game using `/ttt start @username`",
        history_not_found_error: "No moves have been played yet.",
        cmd_status_text: "Game is currently being played between %s and %s",
        cmd_status_turn_text: "It is now %s's turn!",
    },
    end: EndLabels {
        db_error: "Something went wrong! Please try again later.",
        game_not_found_error: "No game is being played in this channel!\nStart a game using `/ttt start @username`",
        cmd_error: "This game cannot be ended by you!",
        cmd_detail_error: "Only players of this game (%s and %s) can end the game!",
        cmd_success: "Game between %s and %s has been ended!",
    },
    help: HelpLabels {
        cmd_text: "Let's learn how to use the /ttt command.\n/ttt command can be \
used to play TicTacToe with other users in a channel! At a time only one game \
can be played in a channel.",
        invalid_command: "You have entered an invalid command!",
        usage_title: "Command Usage:",
        usage_text: USAGE_TEXT,
    },
};
