/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use crate::TagNameError;

#[derive(Debug, Error)]
pub enum TagListError {
    #[error("no tag found in the list")]
    Empty,
    #[error("line {line}: invalid tag name {name:?}: {source}")]
    InvalidName {
        line: usize,
        name: String,
        source: TagNameError,
    },
    #[error("line {line}: duplicate tag name {name}, first defined at line {first_line}")]
    DuplicateName {
        line: usize,
        name: String,
        first_line: usize,
    },
    #[error(
        "line {line}: tag name {name} maps to identifier {ident}, which is already used by {other} at line {other_line}"
    )]
    IdentCollision {
        line: usize,
        name: String,
        ident: String,
        other: String,
        other_line: usize,
    },
    #[error("line {line}: tag name {name} maps to reserved identifier {ident}")]
    ReservedIdent {
        line: usize,
        name: String,
        ident: String,
    },
    #[error("line {line}: too many tags, at most {max} is allowed")]
    TooMany { line: usize, max: usize },
}

impl TagListError {
    /// The 1-based line number of the offending entry, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            TagListError::Empty => None,
            TagListError::InvalidName { line, .. }
            | TagListError::DuplicateName { line, .. }
            | TagListError::IdentCollision { line, .. }
            | TagListError::ReservedIdent { line, .. }
            | TagListError::TooMany { line, .. } => Some(*line),
        }
    }
}

/// A render option that must be usable as a C and rust identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "invalid {kind} {value:?}: should be ascii letters, digits and '_', not starting with a digit"
)]
pub struct InvalidIdentError {
    pub kind: &'static str,
    pub value: String,
}
