/// Named steps the controller defers to a later tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskKind {
    /// Start collecting dimensions staged during the drag.
    Collect,
    /// Publish the collected dimensions.
    Publish,
    /// One frame of edge scrolling.
    FluidScroll,
    /// Deliver queued drag start/update notifications.
    FlushResponders,
    /// Complete a drop whose animation end was never reported.
    SettleDrop,
}

impl TaskKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Collect => "collect",
            Self::Publish => "publish",
            Self::FluidScroll => "fluid_scroll",
            Self::FlushResponders => "flush_responders",
            Self::SettleDrop => "settle_drop",
        }
    }
}

/// When a task becomes runnable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Due {
    /// The first tick after the one it was scheduled in.
    NextFrame,
    /// The first tick at or after this time.
    At(u64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Task {
    kind: TaskKind,
    due: Due,
    frame: u64,
}

/// A small queue of cancelable, named tasks drained by `tick`.
///
/// At most one task of each kind is queued. Tasks run in scheduling order.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<Task>,
    frame: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.tasks.iter().any(|t| t.kind == kind)
    }

    /// Queues `kind`. Returns `false` if it was already queued; the existing entry is kept.
    pub fn schedule(&mut self, kind: TaskKind, due: Due) -> bool {
        if self.is_scheduled(kind) {
            return false;
        }
        dtrace!(task = kind.as_str(), "scheduled");
        self.tasks.push(Task {
            kind,
            due,
            frame: self.frame,
        });
        true
    }

    /// Removes `kind`. Returns whether it was queued.
    pub fn cancel(&mut self, kind: TaskKind) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.kind != kind);
        before != self.tasks.len()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Starts a new frame. Tasks scheduled from here on wait for the next one.
    pub fn advance_frame(&mut self) {
        self.frame += 1;
    }

    /// Removes and returns the first task that is runnable at `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TaskKind> {
        let frame = self.frame;
        let index = self.tasks.iter().position(|t| match t.due {
            Due::NextFrame => t.frame < frame,
            Due::At(at) => at <= now_ms,
        })?;
        Some(self.tasks.remove(index).kind)
    }
}
