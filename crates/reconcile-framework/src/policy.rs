//! # Mutation Policy
//!
//! Each durable entity classifies its attributes once:
//!
//! - **immutable**: may be set at creation, any later change is rejected before any remote call;
//! - **mutable**: a change produces one targeted patch;
//! - **computed**: owned by the remote, never sent.
//!
//! The classification is written as a [`MutationPlan`] built from the declared and stored
//! models, and evaluated by [`crate::DurableReconciler::update`].
//!
//! ```rust
//! use reconcile_framework::field::Field;
//! use reconcile_framework::policy::MutationPlan;
//!
//! let plan = MutationPlan::new("n8n_user")
//!     .immutable("email", &Field::from("a@b.c"), &Field::from("a@b.c"))
//!     .mutable("role", &Field::from("global:admin"), &Field::from("global:member"), |role| role)
//!     .computed("first_name");
//!
//! let patches = plan.into_patches().unwrap();
//! assert_eq!(patches.len(), 1);
//! assert_eq!(patches[0].field, "role");
//! ```

use crate::error::ReconcileError;
use crate::field::Field;
use std::fmt::Display;

/// One targeted remote change.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPatch<P> {
    pub field: &'static str,
    pub patch: P,
}

/// Outcome of comparing a declared model against the stored one.
#[derive(Debug)]
pub struct MutationPlan<P> {
    resource: &'static str,
    violation: Option<ReconcileError>,
    patches: Vec<FieldPatch<P>>,
    computed: Vec<&'static str>,
}

impl<P> MutationPlan<P> {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            violation: None,
            patches: Vec::new(),
            computed: Vec::new(),
        }
    }

    /// Rejects any difference. A declared `Unknown` is not a change.
    pub fn immutable<T: PartialEq + Display>(
        mut self,
        field: &'static str,
        declared: &Field<T>,
        stored: &Field<T>,
    ) -> Self {
        if self.violation.is_none() && !declared.is_unknown() && declared != stored {
            self.violation = Some(ReconcileError::ImmutableFieldChanged {
                resource: self.resource,
                field,
                stored: stored.to_string(),
                declared: declared.to_string(),
            });
        }
        self
    }

    /// Queues `make_patch(declared)` when both sides are known and differ.
    pub fn mutable<T, F>(
        mut self,
        field: &'static str,
        declared: &Field<T>,
        stored: &Field<T>,
        make_patch: F,
    ) -> Self
    where
        T: PartialEq + Clone,
        F: FnOnce(T) -> P,
    {
        if let (Field::Known(declared), Field::Known(stored)) = (declared, stored) {
            if declared != stored {
                self.patches.push(FieldPatch {
                    field,
                    patch: make_patch(declared.clone()),
                });
            }
        }
        self
    }

    pub fn computed(mut self, field: &'static str) -> Self {
        self.computed.push(field);
        self
    }

    pub fn computed_fields(&self) -> &[&'static str] {
        &self.computed
    }

    pub fn is_rejected(&self) -> bool {
        self.violation.is_some()
    }

    /// True when no patch would be sent.
    pub fn is_noop(&self) -> bool {
        self.violation.is_none() && self.patches.is_empty()
    }

    /// The patches to send, or the first immutable violation.
    pub fn into_patches(self) -> Result<Vec<FieldPatch<P>>, ReconcileError> {
        match self.violation {
            Some(violation) => Err(violation),
            None => Ok(self.patches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Patch {
        Role(String),
    }

    fn plan(email: Field<String>, role: Field<String>) -> MutationPlan<Patch> {
        MutationPlan::new("n8n_user")
            .immutable("email", &email, &Field::from("a@b.c"))
            .mutable("role", &role, &Field::from("global:member"), Patch::Role)
            .computed("first_name")
    }

    #[test]
    fn test_immutable_change_is_rejected() {
        let err = plan(Field::from("x@b.c"), Field::from("global:admin"))
            .into_patches()
            .unwrap_err();
        match err {
            ReconcileError::ImmutableFieldChanged {
                field,
                stored,
                declared,
                ..
            } => {
                assert_eq!(field, "email");
                assert_eq!(stored, "a@b.c");
                assert_eq!(declared, "x@b.c");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_immutable_unknown_is_not_a_change() {
        let patches = plan(Field::Unknown, Field::from("global:member"))
            .into_patches()
            .unwrap();
        assert!(patches.is_empty());
    }

    #[test]
    fn test_mutable_patch_requires_both_sides_known() {
        assert!(plan(Field::from("a@b.c"), Field::Null).is_noop());
        assert!(plan(Field::from("a@b.c"), Field::Unknown).is_noop());

        let patches = plan(Field::from("a@b.c"), Field::from("global:admin"))
            .into_patches()
            .unwrap();
        assert_eq!(
            patches,
            vec![FieldPatch {
                field: "role",
                patch: Patch::Role("global:admin".into())
            }]
        );
    }

    #[test]
    fn test_computed_fields_are_recorded() {
        let plan = plan(Field::from("a@b.c"), Field::from("global:member"));
        assert_eq!(plan.computed_fields(), &["first_name"]);
        assert!(!plan.is_rejected());
    }
}
