use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mimir::server::error::Error;
use mimir_test_utils::prelude::*;
use uuid::Uuid;

use crate::util::test_utils::TestContextExt;

mod guild;
mod identity;
mod player;
mod router;

/// Collapse a handler result into the response axum would send.
fn respond<T: IntoResponse>(result: Result<T, Error>) -> Response {
    match result {
        Ok(resp) => resp.into_response(),
        Err(e) => e.into_response(),
    }
}
