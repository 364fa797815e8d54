//! Unified-diff style mismatch report.

use std::io::{self, Write};

/// Accumulates the report for one diff pass.
///
/// The `---`/`+++` header is written lazily before the first mismatch, so a
/// pass with no mismatches writes nothing at all. Output looks like:
///
/// ```text
/// --- github.com/me/app
/// +++ github.com/me/lib
/// - github.com/pkg/errors 645ef00459ed84a119197bfb8d8205042c6df63d
/// + github.com/pkg/errors 816c9085562cd7ee03e7f8188a1cfd942858cded
/// ```
///
/// Write errors cannot be returned from inside the diff callback, so the
/// first one is kept and surfaced by [`MismatchReport::finish`]; nothing is
/// written after it.
pub struct MismatchReport<'a, W: Write> {
    out: W,
    local_label: &'a str,
    reference_label: &'a str,
    header_printed: bool,
    error: Option<io::Error>,
}

impl<'a, W: Write> MismatchReport<'a, W> {
    /// Start a report comparing `local_label` (`---`) with `reference_label` (`+++`).
    pub fn new(out: W, local_label: &'a str, reference_label: &'a str) -> Self {
        Self {
            out,
            local_label,
            reference_label,
            header_printed: false,
            error: None,
        }
    }

    /// Record one mismatch.
    pub fn record(&mut self, name: &str, local_revision: &str, reference_revision: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.write_entry(name, local_revision, reference_revision) {
            self.error = Some(e);
        }
    }

    fn write_entry(&mut self, name: &str, local_revision: &str, reference_revision: &str) -> io::Result<()> {
        if !self.header_printed {
            writeln!(self.out, "--- {}", self.local_label)?;
            writeln!(self.out, "+++ {}", self.reference_label)?;
            self.header_printed = true;
        }
        writeln!(self.out, "- {name} {local_revision}")?;
        writeln!(self.out, "+ {name} {reference_revision}")
    }

    /// Flush the report, returning the first write error if there was one.
    pub fn finish(mut self) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_mismatches_writes_nothing() {
        let mut buf = Vec::new();
        let report = MismatchReport::new(&mut buf, "local", "remote");
        report.finish().unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_header_written_once() {
        let mut buf = Vec::new();
        let mut report = MismatchReport::new(&mut buf, "github.com/me/app", "github.com/me/lib");
        report.record("A", "1", "2");
        report.record("B", "3", "4");
        report.finish().unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "--- github.com/me/app\n+++ github.com/me/lib\n- A 1\n+ A 2\n- B 3\n+ B 4\n"
        );
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_surfaces_on_finish() {
        let mut report = MismatchReport::new(BrokenPipe, "a", "b");
        report.record("A", "1", "2");
        report.record("B", "1", "2");
        let err = report.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
