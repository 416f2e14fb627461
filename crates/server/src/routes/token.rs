//! Credential enrollment.
//!
//! Mounted only when enrollment is enabled in config. Anyone who can reach
//! this route can mint an admin credential, so keep it off in production.

use axum::extract::{Form, State, rejection::FormRejection};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Form for `POST /token`.
#[derive(Debug, Default, Deserialize)]
pub struct TokenForm {
    usr: Option<String>,
    nam: Option<String>,
    lvl: Option<String>,
    uid: Option<String>,
}

/// Mint a credential and return it as plain text.
#[instrument(skip(state, form))]
pub async fn issue(
    State(state): State<AppState>,
    form: std::result::Result<Form<TokenForm>, FormRejection>,
) -> Result<String> {
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let field = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (Some(usr), Some(nam), Some(lvl), Some(uid)) = (
        field(form.usr),
        field(form.nam),
        field(form.lvl),
        field(form.uid),
    ) else {
        return Err(bad_request("not enough parameters"));
    };

    let uid: i64 = uid
        .trim()
        .parse()
        .map_err(|_| bad_request("uid must be an integer"))?;
    if uid < 0 {
        return Err(bad_request("uid must be 0 or higher"));
    }
    let lvl: i64 = lvl
        .trim()
        .parse()
        .map_err(|_| bad_request("lvl must be an integer"))?;
    if lvl != 0 && lvl != 1 {
        return Err(bad_request("level must be 0 or 1"));
    }

    let credential = state
        .resolver()
        .issue(&usr, &nam, &lvl.to_string(), uid)?;
    tracing::info!(user_id = uid, level = lvl, "Credential enrolled");

    Ok(credential)
}

fn bad_request(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
