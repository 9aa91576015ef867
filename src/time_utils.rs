// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{SecondsFormat, Utc};

/// Current UTC time as ISO-8601 with a trailing `Z`.
///
/// Microsecond precision keeps records written in the same second from
/// colliding on the (user_id, timestamp) key.
pub fn utc_now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utc_now_iso_has_z_suffix() {
        let ts = utc_now_iso();
        assert!(ts.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&ts).is_ok());
    }
}
