//! # Identifier Resolution
//!
//! Picks the attribute used to address a remote entity from an ordered list of
//! candidates. The first candidate that is `Known` and non-empty wins; an empty string
//! counts as absent.

use crate::error::ReconcileError;
use crate::field::Field;

/// One attribute that may identify the entity.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub attribute: &'static str,
    pub value: &'a Field<String>,
}

impl<'a> Candidate<'a> {
    pub fn new(attribute: &'static str, value: &'a Field<String>) -> Self {
        Self { attribute, value }
    }
}

/// The identifier that was chosen and the attribute it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentifier {
    pub attribute: &'static str,
    pub value: String,
}

/// Resolves the identifier in priority order.
///
/// Fails with [`ReconcileError::MissingIdentifier`] naming every candidate when none
/// qualifies.
pub fn resolve_identifier<'a, I>(candidates: I) -> Result<ResolvedIdentifier, ReconcileError>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    let mut tried = Vec::new();
    for candidate in candidates {
        if let Some(value) = candidate.value.non_empty() {
            return Ok(ResolvedIdentifier {
                attribute: candidate.attribute,
                value: value.to_string(),
            });
        }
        tried.push(candidate.attribute);
    }
    Err(ReconcileError::MissingIdentifier { candidates: tried })
}
