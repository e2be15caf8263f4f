use chrono::{Duration, Utc};
use mimir::server::error::kind::ErrorKind;
use mimir_test_utils::prelude::*;
use uuid::Uuid;

use crate::util::test_utils::TestContextExt;

mod guild;
mod identity;
mod player;
mod reply;
