//! Transactional diagnostic log
//!
//! Append-only, except that everything reported after a [`LogMarker`] can be
//! erased by rolling back to it. A diagnostic reported during a speculative
//! attempt that is later abandoned is never observed by anyone.

use tracing::debug;

use super::error::Diagnostic;
use super::fatal::ParseError;

/// Opaque snapshot of the log length
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogMarker(usize);

impl LogMarker {
    pub fn len(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    records: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append unconditionally.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        debug!(code = %diagnostic.code, message = %diagnostic.message, "diagnostic");
        self.records.push(diagnostic);
    }

    pub fn snapshot(&self) -> LogMarker {
        LogMarker(self.records.len())
    }

    /// Truncate back to `marker`.
    ///
    /// A marker beyond the current length is a contract violation.
    pub fn rollback(&mut self, marker: LogMarker) -> Result<(), ParseError> {
        let len = self.records.len();
        if marker.0 > len {
            return Err(ParseError::InvalidMarker { marker: marker.0, len });
        }
        self.records.truncate(marker.0);
        Ok(())
    }

    /// Accept everything reported since `marker`. Nothing to do; the call
    /// marks the commit point at call sites.
    pub fn commit(&mut self, _marker: LogMarker) {}

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.records.iter()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|d| d.is_error()).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.records
    }
}

impl<'a> IntoIterator for &'a DiagnosticLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
