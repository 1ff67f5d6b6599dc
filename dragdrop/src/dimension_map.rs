use std::collections::BTreeMap;
use std::sync::Arc;

use crate::draggable::DraggableDimension;
use crate::droppable::DroppableDimension;
use crate::impact::DragImpact;
use crate::types::{DraggableId, DroppableId};

/// All measured draggables and droppables of one drag, keyed by id.
///
/// Cloning is cheap: both maps are shared until one of them is changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DimensionMap {
    draggables: Arc<BTreeMap<DraggableId, DraggableDimension>>,
    droppables: Arc<BTreeMap<DroppableId, DroppableDimension>>,
}

impl DimensionMap {
    pub fn new(
        draggables: impl IntoIterator<Item = DraggableDimension>,
        droppables: impl IntoIterator<Item = DroppableDimension>,
    ) -> Self {
        Self {
            draggables: Arc::new(draggables.into_iter().map(|d| (d.id().clone(), d)).collect()),
            droppables: Arc::new(droppables.into_iter().map(|d| (d.id().clone(), d)).collect()),
        }
    }

    pub fn draggable(&self, id: &DraggableId) -> Option<&DraggableDimension> {
        self.draggables.get(id)
    }

    pub fn droppable(&self, id: &DroppableId) -> Option<&DroppableDimension> {
        self.droppables.get(id)
    }

    pub fn draggables(&self) -> impl Iterator<Item = &DraggableDimension> {
        self.draggables.values()
    }

    pub fn droppables(&self) -> impl Iterator<Item = &DroppableDimension> {
        self.droppables.values()
    }

    pub fn draggable_count(&self) -> usize {
        self.draggables.len()
    }

    /// Draggables of `droppable_id` ordered by index, ties broken by id.
    pub fn inside(&self, droppable_id: &DroppableId) -> Vec<&DraggableDimension> {
        let mut inside: Vec<_> = self
            .draggables
            .values()
            .filter(|d| d.droppable_id() == droppable_id)
            .collect();
        inside.sort_by(|a, b| a.index().cmp(&b.index()).then_with(|| a.id().cmp(b.id())));
        inside
    }

    pub fn with_draggable(&self, draggable: DraggableDimension) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.draggables).insert(draggable.id().clone(), draggable);
        next
    }

    pub fn without_draggable(&self, id: &DraggableId) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.draggables).remove(id);
        next
    }

    pub fn with_droppable(&self, droppable: DroppableDimension) -> Self {
        let mut next = self.clone();
        Arc::make_mut(&mut next.droppables).insert(droppable.id().clone(), droppable);
        next
    }

    /// Moves placeholder space to whatever foreign list `impact` is over.
    ///
    /// The list dragged over in `previous` loses its placeholder when the item left it; the
    /// home list never gets one.
    pub fn with_placeholders(
        &self,
        draggable: &DraggableDimension,
        previous: &DragImpact,
        impact: &DragImpact,
    ) -> Self {
        let mut next = self.clone();
        let now = impact.dragged_over();
        let left = previous
            .dragged_over()
            .filter(|last| Some(*last) != now)
            .and_then(|last| self.droppable(last))
            .filter(|d| d.subject.placeholder.is_some());
        if let Some(droppable) = left {
            next = next.with_droppable(droppable.without_placeholder());
        }

        let Some(over) = now else {
            return next;
        };
        if over == draggable.droppable_id() {
            return next;
        }
        let Some(droppable) = next.droppable(over) else {
            return next;
        };
        if droppable.subject.placeholder.is_some() {
            return next;
        }
        let grown = droppable.with_placeholder(draggable, &next.inside(over));
        next.with_droppable(grown)
    }

    /// Index problems within each droppable: duplicates and gaps.
    pub fn check_indices(&self) -> Vec<IndexIssue> {
        let mut issues = Vec::new();
        for droppable_id in self.droppables.keys() {
            let inside = self.inside(droppable_id);
            for pair in inside.windows(2) {
                if pair[0].index() == pair[1].index() {
                    issues.push(IndexIssue::Duplicate {
                        droppable_id: droppable_id.clone(),
                        index: pair[1].index(),
                    });
                }
            }
            let mut indices: Vec<usize> = inside.iter().map(|d| d.index()).collect();
            indices.dedup();
            if let Some((expected, found)) = indices
                .iter()
                .enumerate()
                .find(|(expected, index)| *expected != **index)
            {
                issues.push(IndexIssue::Gap {
                    droppable_id: droppable_id.clone(),
                    expected,
                    found: *found,
                });
            }
        }
        issues
    }
}

/// A data-quality problem with the draggable indices of a list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexIssue {
    Duplicate { droppable_id: DroppableId, index: usize },
    Gap { droppable_id: DroppableId, expected: usize, found: usize },
}

impl core::fmt::Display for IndexIssue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Duplicate { droppable_id, index } => {
                write!(f, "droppable {droppable_id} has more than one item at index {index}")
            }
            Self::Gap {
                droppable_id,
                expected,
                found,
            } => write!(
                f,
                "droppable {droppable_id} expected index {expected}, found {found}"
            ),
        }
    }
}
