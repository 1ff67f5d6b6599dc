use dragdrop::{DraggableId, DroppableId};

/// Draggables mounted or unmounted while a drag is live, waiting to be published.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Staging {
    additions: Vec<DraggableId>,
    removals: Vec<DraggableId>,
    modified: Vec<DroppableId>,
}

/// What a publish has to collect.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StagedChanges {
    pub additions: Vec<DraggableId>,
    pub removals: Vec<DraggableId>,
    /// Droppables whose content changed; their scroll is re-read.
    pub modified: Vec<DroppableId>,
}

impl Staging {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn add(&mut self, id: DraggableId, droppable_id: DroppableId) {
        self.removals.retain(|r| r != &id);
        if !self.additions.contains(&id) {
            self.additions.push(id);
        }
        self.touch(droppable_id);
    }

    /// An item added and removed within one collection never gets published.
    pub fn remove(&mut self, id: DraggableId, droppable_id: DroppableId) {
        let before = self.additions.len();
        self.additions.retain(|a| a != &id);
        if before == self.additions.len() && !self.removals.contains(&id) {
            self.removals.push(id);
        }
        self.touch(droppable_id);
    }

    fn touch(&mut self, droppable_id: DroppableId) {
        if !self.modified.contains(&droppable_id) {
            self.modified.push(droppable_id);
        }
    }

    pub fn take(&mut self) -> StagedChanges {
        let staged = core::mem::take(self);
        StagedChanges {
            additions: staged.additions,
            removals: staged.removals,
            modified: staged.modified,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
