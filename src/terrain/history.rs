//! Undo stack of parameter snapshots.

use crate::params::TerrainParameters;

/// Last-in-first-out stack of pre-change parameter snapshots.
///
/// Depth is unbounded. Not synchronized: a single owner drives it, and
/// concurrent callers must serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct ParameterHistory {
    snapshots: Vec<TerrainParameters>,
}

impl ParameterHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the parameters in effect before a change
    pub fn push(&mut self, current: TerrainParameters) {
        self.snapshots.push(current);
    }

    /// Remove and return the most recent snapshot; `None` means nothing to revert
    pub fn pop(&mut self) -> Option<TerrainParameters> {
        self.snapshots.pop()
    }

    pub fn peek(&self) -> Option<&TerrainParameters> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_returns_last_pushed() {
        let mut history = ParameterHistory::new();
        let first = TerrainParameters::default();
        let second = TerrainParameters {
            octaves: 6,
            ..first
        };

        history.push(first);
        history.push(second);
        assert_eq!(history.len(), 2);
        assert_eq!(history.peek(), Some(&second));
        assert_eq!(history.pop(), Some(second));
        assert_eq!(history.pop(), Some(first));
        assert!(history.is_empty());
    }

    #[test]
    fn test_pop_on_empty_is_noop() {
        let mut history = ParameterHistory::new();
        assert_eq!(history.pop(), None);
        assert_eq!(history.pop(), None);
        assert_eq!(history.len(), 0);
    }
}
