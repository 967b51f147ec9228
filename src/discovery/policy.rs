//! Inclusion policy for discovered services
//!
//! A service participates in script generation only when it carries both the
//! `dockermi.order` and `dockermi.active` labels and `dockermi.active` is the
//! string "true". The force switch overrides the whole table and includes
//! everything, order label or not.

/// Per-service inclusion decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inclusion {
    Include,
    /// Both labels present but `dockermi.active` is not "true".
    SkipInactive,
    /// Either required label is absent.
    SkipMissingLabels,
}

/// Applies the inclusion table to one service's reserved labels.
pub fn evaluate(order: Option<&str>, active: Option<&str>, force: bool) -> Inclusion {
    if force {
        return Inclusion::Include;
    }

    match (order, active) {
        (Some(_), Some("true")) => Inclusion::Include,
        (Some(_), Some(_)) => Inclusion::SkipInactive,
        _ => Inclusion::SkipMissingLabels,
    }
}
