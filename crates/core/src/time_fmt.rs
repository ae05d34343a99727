// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable rendering of elapsed time.

use std::time::Duration;

/// Format an elapsed duration compactly.
///
/// `850µs`, `12ms`, `3.42s`, `2m05s`, `1h02m05s`.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    if secs >= 3600 {
        format!("{}h{:02}m{:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else if secs >= 1 {
        // Truncated, never rounded up to 60.00s.
        let centis = elapsed.subsec_millis() / 10;
        format!("{}.{:02}s", secs, centis)
    } else if elapsed.as_millis() >= 1 {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{}µs", elapsed.as_micros())
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
