//! Diff Engine
//!
//! Pure reconciliation planning between a reference and a target label set

use serde::Serialize;

use crate::label::{Label, LabelSet};

/// A single reconciliation step against a target repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    /// Create a label that only exists in the reference
    Create { label: Label },

    /// Update a label whose color or description differs from the reference
    ///
    /// Carries the target's current state alongside the desired end state so
    /// dry-run output can show exactly what would change.
    Update { name: String, old: Label, new: Label },

    /// Delete a label that does not exist in the reference
    Delete { name: String },
}

impl Operation {
    /// The label name this operation touches
    pub fn name(&self) -> &str {
        match self {
            Operation::Create { label } => &label.name,
            Operation::Update { name, .. } | Operation::Delete { name } => name,
        }
    }

    /// Human-readable field changes for an update, empty otherwise
    pub fn changes(&self) -> Vec<String> {
        let Operation::Update { old, new, .. } = self else {
            return Vec::new();
        };

        let mut changes = Vec::new();

        if old.color != new.color {
            changes.push(format!("color: {} -> {}", old.color, new.color));
        }

        if old.description != new.description {
            let old_desc = old.description.as_deref().unwrap_or("(none)");
            let new_desc = new.description.as_deref().unwrap_or("(none)");
            changes.push(format!("description: {} -> {}", old_desc, new_desc));
        }

        changes
    }
}

/// Ordered reconciliation plan for one target repository
///
/// Operations are sorted by label name within each category, and categories
/// appear in the fixed order Create, Update, Delete, so identical inputs
/// always produce identical plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    operations: Vec<Operation>,
}

impl Plan {
    /// Operations in execution order
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Whether the target already matches the reference
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Total number of operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Number of labels that would be created
    pub fn created(&self) -> usize {
        self.count(|op| matches!(op, Operation::Create { .. }))
    }

    /// Number of labels that would be updated
    pub fn updated(&self) -> usize {
        self.count(|op| matches!(op, Operation::Update { .. }))
    }

    /// Number of labels that would be deleted
    pub fn deleted(&self) -> usize {
        self.count(|op| matches!(op, Operation::Delete { .. }))
    }

    fn count(&self, pred: impl Fn(&Operation) -> bool) -> usize {
        self.operations.iter().filter(|op| pred(op)).count()
    }
}

impl IntoIterator for Plan {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.into_iter()
    }
}

/// Compute the plan that makes `target` match `reference`
///
/// Pure and total: never consults the network, never mutates its inputs, and
/// raises no errors for well-formed label sets. An empty reference deletes
/// every target label; an empty target creates every reference label.
pub fn diff(reference: &LabelSet, target: &LabelSet) -> Plan {
    let mut creates = Vec::new();
    let mut updates = Vec::new();

    // LabelSet iterates sorted by name, so each category comes out sorted.
    for label in reference {
        match target.get(&label.name) {
            None => creates.push(Operation::Create { label: label.clone() }),
            Some(current) => {
                if current.color != label.color || current.description != label.description {
                    updates.push(Operation::Update {
                        name: label.name.clone(),
                        old: current.clone(),
                        new: label.clone(),
                    });
                }
            }
        }
    }

    let deletes = target
        .iter()
        .filter(|label| !reference.contains(&label.name))
        .map(|label| Operation::Delete { name: label.name.clone() });

    let operations = creates.into_iter().chain(updates).chain(deletes).collect();

    Plan { operations }
}
