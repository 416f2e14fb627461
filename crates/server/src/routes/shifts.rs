//! Shift planning handlers.
//!
//! Workers act on their own shifts. Admins read the whole plan and may
//! delete anyone's shift, but cannot take shifts themselves.

use axum::{
    Json,
    extract::{Form, Query, State, rejection::FormRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use shift_planner_core::{UserId, UserShiftList};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::RequireIdentity;
use crate::state::AppState;

/// Query for `GET /`.
#[derive(Debug, Default, Deserialize)]
pub struct PlanQuery {
    userid: Option<String>,
}

/// Form for `POST /`.
#[derive(Debug, Default, Deserialize)]
pub struct ShiftForm {
    day: Option<String>,
    shift: Option<String>,
}

/// Query for `DELETE /`.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteQuery {
    userid: Option<String>,
    day: Option<String>,
    shift: Option<String>,
}

/// List shifts.
///
/// Workers get their own list. Admins get the whole plan, or one user's list
/// with `?userid=N`.
#[instrument(skip(caller, state), fields(user_id = %caller.id, role = %caller.role))]
pub async fn list(
    RequireIdentity(caller): RequireIdentity,
    State(state): State<AppState>,
    Query(query): Query<PlanQuery>,
) -> Result<Response> {
    if !caller.is_admin() {
        let shifts = state.plan()?.user_shifts(caller.id);
        return Ok(Json(shifts).into_response());
    }

    match present(query.userid.as_deref()) {
        None => {
            let plan = state.plan()?;
            Ok(Json(&*plan).into_response())
        }
        Some(userid) => {
            let target = UserId::new(parse_number(userid, "userid must be numeric")?);
            let shifts = state.plan()?.user_shifts(target);
            Ok(Json(shifts).into_response())
        }
    }
}

/// Take a shift for the caller.
#[instrument(skip(caller, state, form), fields(user_id = %caller.id, role = %caller.role))]
pub async fn create(
    RequireIdentity(caller): RequireIdentity,
    State(state): State<AppState>,
    form: std::result::Result<Form<ShiftForm>, FormRejection>,
) -> Result<Json<UserShiftList>> {
    if caller.is_admin() {
        return Err(AppError::BadRequest("admins cannot request shifts".to_string()));
    }

    let form = form.map(|Form(form)| form).unwrap_or_default();
    let (Some(day), Some(shift)) = (present(form.day.as_deref()), present(form.shift.as_deref()))
    else {
        return Err(AppError::BadRequest("missing day or shift".to_string()));
    };
    let day = parse_number(day, "day must be numeric")?;
    let shift = parse_number(shift, "shift must be numeric")?;

    let mut plan = state.plan()?;
    plan.allocate(&caller, day, shift)?;
    tracing::info!(day, shift, "Shift allocated");

    Ok(Json(plan.user_shifts(caller.id)))
}

/// Give up a shift.
///
/// Admins name the holder with `userid`; workers always act on themselves.
/// Responds with the holder's remaining shifts.
#[instrument(skip(caller, state), fields(user_id = %caller.id, role = %caller.role))]
pub async fn remove(
    RequireIdentity(caller): RequireIdentity,
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<UserShiftList>> {
    let day = present(query.day.as_deref());
    let shift = present(query.shift.as_deref());

    let (target, day, shift) = if caller.is_admin() {
        let (Some(userid), Some(day), Some(shift)) = (present(query.userid.as_deref()), day, shift)
        else {
            return Err(AppError::BadRequest(
                "missing day, userid or shift".to_string(),
            ));
        };
        (
            UserId::new(parse_number(userid, "userid must be numeric")?),
            day,
            shift,
        )
    } else {
        let (Some(day), Some(shift)) = (day, shift) else {
            return Err(AppError::BadRequest("missing day or shift".to_string()));
        };
        (caller.id, day, shift)
    };
    let day = parse_number(day, "day must be numeric")?;
    let shift = parse_number(shift, "shift must be numeric")?;

    let mut plan = state.plan()?;
    plan.delete_shift(target, day, shift)?;
    tracing::info!(target_id = %target, day, shift, "Shift released");

    Ok(Json(plan.user_shifts(target)))
}

/// Treat an empty parameter the same as an absent one.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_number(value: &str, message: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(message.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_present_treats_empty_as_missing() {
        assert_eq!(present(None), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(Some("3")), Some("3"));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("4", "bad").unwrap(), 4);
        assert_eq!(parse_number("-1", "bad").unwrap(), -1);
        let err = parse_number("two", "day must be numeric").unwrap_err();
        assert_eq!(err.to_string(), "day must be numeric");
    }
}
