//! Child-index paths from the forest roots down to a node.
//!
//! `path[0]` indexes the roots, every following element indexes the children of
//! the node selected so far. A path is only meaningful against the snapshot it
//! was resolved in; any structural edit may shift it.

use crate::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Index of the node within its parent's children (or within the roots)
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node. Empty for root-level nodes and for the empty path.
    pub fn parent(&self) -> Path {
        match self.0.split_last() {
            Some((_, rest)) => Path(rest.to_vec()),
            None => Path::default(),
        }
    }

    /// Path of this node's `index`-th child
    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    /// Same parent, different final index
    pub fn sibling(&self, index: usize) -> Path {
        self.parent().child(index)
    }
}

impl Deref for Path {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl From<&[usize]> for Path {
    fn from(indices: &[usize]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CommonError::InvalidPath(s.to_string()));
        }
        trimmed
            .split('.')
            .map(|part| part.trim().parse::<usize>())
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
            .map_err(|_| CommonError::InvalidPath(s.to_string()))
    }
}
