//! HTTP surface: request validation, command dispatch, response assembly.

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Form, Json, Router};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::COMMAND_NAME;
use crate::engine::GameEngine;
use crate::error::CommandError;
use crate::game::PlayerRef;
use crate::locales::Locale;
use crate::respond;
use crate::slack::{SlackResponse, SlashRequest};

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The command engine.
    pub engine: Arc<GameEngine>,
    /// Expected slash-command verification token.
    pub command_token: String,
    /// Message catalog.
    pub locale: &'static Locale,
}

/// Builds the service router: a GET probe and the slash-command POST
/// handler, both at the root path.
pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(probe).post(slash)).with_state(state)
}

/// Answers Slack's periodic certificate-verification probes.
async fn probe() -> &'static str {
    "OK"
}

/// Validates and dispatches one slash-command request.
///
/// Body validation failures and token mismatches are rejected with 400
/// before any command runs; everything past that point answers 200 with a
/// Slack message body, errors included.
#[instrument(skip_all)]
async fn slash(
    State(state): State<AppState>,
    form: Result<Form<SlashRequest>, FormRejection>,
) -> Response {
    let Ok(Form(req)) = form else {
        debug!("Rejected malformed post body");
        return (StatusCode::BAD_REQUEST, "Incorrect Post Body!").into_response();
    };
    if req.command != format!("/{}", COMMAND_NAME) {
        debug!(command = %req.command, "Rejected unexpected command");
        return (StatusCode::BAD_REQUEST, "Incorrect Post Body!").into_response();
    }
    if req.token != state.command_token {
        debug!("Rejected bad verification token");
        return (StatusCode::BAD_REQUEST, "Incorrect Token!").into_response();
    }

    info!(
        team_id = %req.team_id,
        channel_id = %req.channel_id,
        user = %req.user_name,
        text = %req.text,
        "Incoming request"
    );
    Json(dispatch(&state, &req).await).into_response()
}

/// Routes the command word to its handler. Unknown words and malformed
/// arguments fall back to the help response instead of reaching the engine.
async fn dispatch(state: &AppState, req: &SlashRequest) -> SlackResponse {
    let locale = state.locale;
    let mut args = req.text.split_whitespace();

    let Some(word) = args.next() else {
        return respond::help(locale, Some(locale.help.invalid_command));
    };

    match word {
        "start" => {
            let Some(name) = args.next().and_then(|arg| arg.strip_prefix('@')) else {
                return respond::help(locale, None);
            };
            if name == req.user_name {
                return respond::help(locale, Some(locale.start.same_user_error));
            }
            let challenger = PlayerRef::new(req.user_id.clone(), req.user_name.clone());
            match state
                .engine
                .start(&req.team_id, &req.channel_id, challenger, name)
                .await
            {
                Ok(outcome) => respond::start_ok(locale, &outcome),
                Err(err) => {
                    log_operational(&err);
                    respond::start_error(locale, req, &err)
                }
            }
        }
        "play" => {
            let Some(arg) = args.next() else {
                return respond::help(locale, None);
            };
            let Ok(cell) = arg.parse::<usize>() else {
                return respond::play_move_arg_error(locale);
            };
            match state
                .engine
                .play(&req.team_id, &req.channel_id, &req.user_name, cell)
            {
                Ok(outcome) => respond::play_ok(locale, &outcome),
                Err(err) => {
                    log_operational(&err);
                    respond::play_error(locale, &err)
                }
            }
        }
        "status" => match state.engine.status(&req.team_id, &req.channel_id) {
            Ok(game) => respond::status_ok(locale, &game),
            Err(err) => {
                log_operational(&err);
                respond::status_error(locale, &err)
            }
        },
        "history" => match state.engine.history(&req.team_id, &req.channel_id) {
            Ok(game) => respond::history_ok(locale, &game),
            Err(err) => {
                log_operational(&err);
                respond::history_error(locale, &err)
            }
        },
        "end" => match state
            .engine
            .end(&req.team_id, &req.channel_id, &req.user_name)
        {
            Ok(game) => respond::end_ok(locale, &game),
            Err(err) => {
                log_operational(&err);
                respond::end_error(locale, &err)
            }
        },
        "help" => respond::help(locale, None),
        _ => respond::help(locale, Some(locale.help.invalid_command)),
    }
}

/// Store and membership faults are operational errors; business outcomes
/// are not logged as failures.
fn log_operational(err: &CommandError) {
    if err.is_operational() {
        error!(error = %err, "Command failed");
    }
}
