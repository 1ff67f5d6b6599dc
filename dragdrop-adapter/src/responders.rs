use dragdrop::{DragStart, DragUpdate, DraggableId, DropReason, DropResult, MovementMode};

/// Payload of the first notification of a drag, sent before any dimension is read.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BeforeCapture {
    pub draggable_id: DraggableId,
    pub mode: MovementMode,
}

/// Lets a responder replace the default screen reader message.
#[derive(Debug, Default)]
pub struct Announce {
    message: Option<String>,
}

impl Announce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announces `message` instead of the default. Only the first call counts.
    pub fn announce(&mut self, message: impl Into<String>) {
        if self.message.is_some() {
            dwarn!("announcement already made; ignoring the second one");
            return;
        }
        self.message = Some(message.into());
    }

    pub fn is_announced(&self) -> bool {
        self.message.is_some()
    }

    pub(crate) fn into_message(self) -> Option<String> {
        self.message
    }
}

type Handler<T> = Box<dyn FnMut(&T)>;
type AnnouncingHandler<T> = Box<dyn FnMut(&T, &mut Announce)>;

/// Host callbacks, one optional handler per lifecycle point.
///
/// ```
/// use dragdrop_adapter::Responders;
///
/// let responders = Responders::new()
///     .with_on_drag_end(|result, _announce| println!("dropped: {:?}", result.destination))
///     .with_announcer(|message| println!("{message}"));
/// assert!(responders.on_drag_end.is_some());
/// ```
#[derive(Default)]
pub struct Responders {
    pub on_before_capture: Option<Handler<BeforeCapture>>,
    pub on_before_drag_start: Option<Handler<DragStart>>,
    pub on_drag_start: Option<AnnouncingHandler<DragStart>>,
    pub on_drag_update: Option<AnnouncingHandler<DragUpdate>>,
    pub on_drag_end: Option<AnnouncingHandler<DropResult>>,
    /// Receives every announcement, custom or default.
    pub announcer: Option<Box<dyn FnMut(&str)>>,
}

impl core::fmt::Debug for Responders {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Responders")
            .field("on_before_capture", &self.on_before_capture.is_some())
            .field("on_before_drag_start", &self.on_before_drag_start.is_some())
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_update", &self.on_drag_update.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("announcer", &self.announcer.is_some())
            .finish()
    }
}

impl Responders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_before_capture(mut self, f: impl FnMut(&BeforeCapture) + 'static) -> Self {
        self.on_before_capture = Some(Box::new(f));
        self
    }

    pub fn with_on_before_drag_start(mut self, f: impl FnMut(&DragStart) + 'static) -> Self {
        self.on_before_drag_start = Some(Box::new(f));
        self
    }

    pub fn with_on_drag_start(
        mut self,
        f: impl FnMut(&DragStart, &mut Announce) + 'static,
    ) -> Self {
        self.on_drag_start = Some(Box::new(f));
        self
    }

    pub fn with_on_drag_update(
        mut self,
        f: impl FnMut(&DragUpdate, &mut Announce) + 'static,
    ) -> Self {
        self.on_drag_update = Some(Box::new(f));
        self
    }

    pub fn with_on_drag_end(mut self, f: impl FnMut(&DropResult, &mut Announce) + 'static) -> Self {
        self.on_drag_end = Some(Box::new(f));
        self
    }

    pub fn with_announcer(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.announcer = Some(Box::new(f));
        self
    }
}

// Positions are announced 1-based.
fn position(index: usize) -> usize {
    index + 1
}

pub fn default_start_message(start: &DragStart) -> String {
    format!(
        "You have lifted an item in position {}",
        position(start.source.index)
    )
}

pub fn default_update_message(update: &DragUpdate) -> String {
    if let Some(destination) = &update.destination {
        let from = position(update.source.index);
        let to = position(destination.index);
        if destination.droppable_id == update.source.droppable_id {
            return format!("You have moved the item from position {from} to position {to}");
        }
        return format!(
            "You have moved the item from position {from} in list {} to list {} in position {to}",
            update.source.droppable_id, destination.droppable_id
        );
    }
    if let Some(combine) = &update.combine {
        return combined_message(update.draggable_id.as_str(), update, combine);
    }
    "You are over an area that cannot be dropped on".to_owned()
}

fn combined_message(id: &str, update: &DragUpdate, combine: &dragdrop::Combine) -> String {
    if combine.droppable_id == update.source.droppable_id {
        format!("The item {id} has been combined with {}", combine.draggable_id)
    } else {
        format!(
            "The item {id} in list {} has been combined with {} in list {}",
            update.source.droppable_id, combine.draggable_id, combine.droppable_id
        )
    }
}

pub fn default_end_message(result: &DropResult) -> String {
    let from = position(result.source.index);
    if result.reason == DropReason::Cancel {
        return format!(
            "Movement cancelled. The item has returned to its starting position of {from}"
        );
    }
    if let Some(combine) = &result.combine {
        let update = DragUpdate {
            draggable_id: result.draggable_id.clone(),
            item_type: result.item_type.clone(),
            source: result.source.clone(),
            mode: result.mode,
            destination: None,
            combine: None,
        };
        return format!(
            "You have dropped the item. {}",
            combined_message(result.draggable_id.as_str(), &update, combine)
        );
    }
    match &result.destination {
        Some(destination) if destination.droppable_id != result.source.droppable_id => format!(
            concat!(
                "You have dropped the item. ",
                "It has moved from position {from} in list {} to position {} in list {}"
            ),
            result.source.droppable_id,
            position(destination.index),
            destination.droppable_id,
            from = from,
        ),
        Some(destination) if destination.index != result.source.index => format!(
            "You have dropped the item. It has moved from position {from} to position {}",
            position(destination.index)
        ),
        Some(_) => format!("You have dropped the item. It has not moved from position {from}"),
        None => format!(
            concat!(
                "The item has been dropped while not over a drop area. ",
                "It has returned to its starting position of {from}"
            ),
            from = from,
        ),
    }
}
