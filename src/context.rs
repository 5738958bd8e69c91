//! State carried between conversions in an interactive session

use crate::artifacts::Session;
use crate::pipeline::ConversionOutcome;

/// The most recent conversion and how many have succeeded
///
/// A plain value owned by the interactive loop; nothing here is shared or
/// persisted.
#[derive(Debug, Clone, Default)]
pub struct ConversionContext {
    last: Option<(ConversionOutcome, Option<Session>)>,
    conversion_count: usize,
}

impl ConversionContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a successful conversion and the session resolved for it
    pub fn record_success(&mut self, outcome: ConversionOutcome, session: Option<Session>) {
        self.conversion_count += 1;
        self.last = Some((outcome, session));
    }

    /// Forget the last result; the conversion count is kept
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Last outcome and its session, if any
    pub fn last(&self) -> Option<(&ConversionOutcome, Option<&Session>)> {
        self.last.as_ref().map(|(o, s)| (o, s.as_ref()))
    }

    /// Successful conversions so far
    pub fn conversion_count(&self) -> usize {
        self.conversion_count
    }
}
