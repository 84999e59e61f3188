use crate::domain::models::{Path, PathSet};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("path {} does not exist ({len} found)", .index + 1)]
    IndexOutOfRange { index: usize, len: usize },
    #[error("no results to switch between")]
    NoResults,
}

/// Holds the equally-short paths of one query and which one is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSelector {
    paths: PathSet,
    active: usize,
}

impl PathSelector {
    /// Starts on path 0. Returns `None` for an empty set.
    pub fn select(paths: PathSet) -> Option<Self> {
        if paths.is_empty() {
            return None;
        }
        Some(Self { paths, active: 0 })
    }

    pub fn set_active(&mut self, index: usize) -> Result<(), SelectError> {
        if index >= self.paths.len() {
            return Err(SelectError::IndexOutOfRange {
                index,
                len: self.paths.len(),
            });
        }
        self.active = index;
        Ok(())
    }

    pub fn active(&self) -> &Path {
        &self.paths[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn alternatives_summary(&self) -> Option<String> {
        (self.paths.len() > 1).then(|| {
            format!(
                "Found {} different paths with the same number of links.",
                self.paths.len()
            )
        })
    }

    /// Switch-control labels; empty when there is nothing to switch to.
    pub fn labels(&self) -> Vec<String> {
        if self.paths.len() < 2 {
            return Vec::new();
        }
        (1..=self.paths.len()).map(|n| format!("Path {n}")).collect()
    }
}
