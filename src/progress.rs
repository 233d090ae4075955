use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::extract::ExtractedElement;

/// Diagnostics on stderr, stamped with time since start. Stdout is left to
/// the preview.
pub struct ConsoleProgress {
    enabled: bool,
    t0: Instant,
}

impl ConsoleProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            t0: Instant::now(),
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.enabled {
            let line = stamp(self.t0.elapsed(), msg.as_ref());
            let _ = writeln!(io::stderr().lock(), "{line}");
        }
    }

    pub fn extracted(&self, elements: &[ExtractedElement]) {
        let tables = elements
            .iter()
            .filter(|e| matches!(e, ExtractedElement::Table { .. }))
            .count();
        self.info(format!(
            "extracted {} elements ({} text, {tables} table)",
            elements.len(),
            elements.len() - tables
        ));
    }
}

/// `[  0.042s] msg`; past a minute `[ 1m05.300s] msg`.
fn stamp(elapsed: Duration, msg: &str) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    if secs < 60 {
        format!("[{:>3}.{millis:03}s] {msg}", secs)
    } else {
        format!("[{:>2}m{:02}.{millis:03}s] {msg}", secs / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::stamp;

    #[test]
    fn stamps_sub_second_and_minute_durations() {
        assert_eq!(stamp(Duration::from_millis(42), "x"), "[  0.042s] x");
        assert_eq!(stamp(Duration::from_millis(12_500), "x"), "[ 12.500s] x");
        assert_eq!(stamp(Duration::from_millis(65_300), "x"), "[ 1m05.300s] x");
    }
}
