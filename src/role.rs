//! Layout roles recognized by the grid engine.
//!
//! A document marks grid-aligned elements with class markers such as `grid`
//! or `width-auto`. Rather than matching selectors implicitly, every marker is
//! parsed into a [`LayoutRole`] and every role maps to exactly one
//! [`LayoutRule`] that the layout code dispatches on.
//!
//! ```rust
//! use monogrid::role::{LayoutRole, LayoutRule};
//!
//! let role: LayoutRole = "width-auto".parse().unwrap();
//! assert_eq!(role.rule(), LayoutRule::AbsorbLeftover);
//!
//! let roles = LayoutRole::from_classes("grid fancy incremental");
//! assert_eq!(roles, vec![LayoutRole::Grid, LayoutRole::Incremental]);
//! ```

use crate::error::Error;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A recognized class marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutRole {
    /// `grid`: children share the container's columns evenly.
    Grid,
    /// `tree`: nested list drawn with connectors instead of bullets.
    Tree,
    /// `incremental`: list items are revealed one at a time.
    Incremental,
    /// `width-min`: table column as narrow as its content.
    WidthMin,
    /// `width-auto`: table column takes the leftover width.
    WidthAuto,
    /// `debug-toggle`: the checkbox controlling the overlay.
    DebugToggle,
    /// `debug-toggle-label`: the checkbox's label.
    DebugToggleLabel,
    /// `debug-grid`: the overlay render target.
    DebugGrid,
}

/// The layout behavior a role selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutRule {
    /// Divide columns evenly among children.
    EvenColumns,
    /// Indent nested levels by a fixed number of columns.
    TreeIndent,
    /// Show only the revealed prefix of the items.
    IncrementalReveal,
    /// Size to minimal content width.
    MinContentWidth,
    /// Absorb leftover columns.
    AbsorbLeftover,
    /// Toggle the overlay on interaction.
    OverlayControl,
    /// Render next to the overlay control.
    OverlayLabel,
    /// Draw guideline marks at every cell boundary.
    OverlayTarget,
}

const ALL_ROLES: [LayoutRole; 8] = [
    LayoutRole::Grid,
    LayoutRole::Tree,
    LayoutRole::Incremental,
    LayoutRole::WidthMin,
    LayoutRole::WidthAuto,
    LayoutRole::DebugToggle,
    LayoutRole::DebugToggleLabel,
    LayoutRole::DebugGrid,
];

static BY_MARKER: Lazy<HashMap<&'static str, LayoutRole>> =
    Lazy::new(|| ALL_ROLES.iter().map(|r| (r.marker(), *r)).collect());

impl LayoutRole {
    /// The class marker this role is written as.
    pub fn marker(self) -> &'static str {
        match self {
            LayoutRole::Grid => "grid",
            LayoutRole::Tree => "tree",
            LayoutRole::Incremental => "incremental",
            LayoutRole::WidthMin => "width-min",
            LayoutRole::WidthAuto => "width-auto",
            LayoutRole::DebugToggle => "debug-toggle",
            LayoutRole::DebugToggleLabel => "debug-toggle-label",
            LayoutRole::DebugGrid => "debug-grid",
        }
    }

    /// The rule this role selects.
    pub fn rule(self) -> LayoutRule {
        match self {
            LayoutRole::Grid => LayoutRule::EvenColumns,
            LayoutRole::Tree => LayoutRule::TreeIndent,
            LayoutRole::Incremental => LayoutRule::IncrementalReveal,
            LayoutRole::WidthMin => LayoutRule::MinContentWidth,
            LayoutRole::WidthAuto => LayoutRule::AbsorbLeftover,
            LayoutRole::DebugToggle => LayoutRule::OverlayControl,
            LayoutRole::DebugToggleLabel => LayoutRule::OverlayLabel,
            LayoutRole::DebugGrid => LayoutRule::OverlayTarget,
        }
    }

    /// Every recognized role.
    pub fn all() -> &'static [LayoutRole] {
        &ALL_ROLES
    }

    /// Parses a whitespace-separated class attribute, keeping recognized
    /// markers in order and skipping the rest.
    pub fn from_classes(classes: &str) -> Vec<LayoutRole> {
        classes
            .split_whitespace()
            .filter_map(|class| match class.parse() {
                Ok(role) => Some(role),
                Err(_) => {
                    log::trace!("ignoring unrecognized class `{class}`");
                    None
                }
            })
            .collect()
    }
}

impl FromStr for LayoutRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BY_MARKER
            .get(s)
            .copied()
            .ok_or_else(|| Error::UnknownRole(s.to_string()))
    }
}

impl fmt::Display for LayoutRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_marker_round_trips() {
        for role in LayoutRole::all() {
            assert_eq!(role.marker().parse::<LayoutRole>().unwrap(), *role);
            assert_eq!(role.to_string(), role.marker());
        }
    }

    #[test]
    fn test_rules_are_distinct() {
        let mut rules: Vec<LayoutRule> = Vec::new();
        for role in LayoutRole::all() {
            assert!(!rules.contains(&role.rule()));
            rules.push(role.rule());
        }
    }

    #[test]
    fn test_unknown_marker() {
        let err = "grid-ish".parse::<LayoutRole>().unwrap_err();
        assert!(matches!(err, Error::UnknownRole(ref s) if s == "grid-ish"));
    }

    #[test]
    fn test_from_classes_skips_unknown() {
        assert_eq!(
            LayoutRole::from_classes("  width-min  bold width-auto "),
            vec![LayoutRole::WidthMin, LayoutRole::WidthAuto]
        );
        assert!(LayoutRole::from_classes("").is_empty());
    }
}
