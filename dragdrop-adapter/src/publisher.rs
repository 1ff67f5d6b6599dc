use std::collections::VecDeque;

use dragdrop::{
    Combine, Critical, DragImpact, DragStart, DragUpdate, DraggableLocation, DropResult,
    MovementMode,
};

use crate::responders::{
    Announce, BeforeCapture, Responders, default_end_message, default_start_message,
    default_update_message,
};

#[derive(Clone, Debug)]
enum Queued {
    Start(DragStart),
    Update(DragUpdate),
}

#[derive(Clone, Debug)]
struct Live {
    critical: Critical,
    mode: MovementMode,
    last_destination: Option<DraggableLocation>,
    last_combine: Option<Combine>,
}

/// Delivers lifecycle notifications to [`Responders`].
///
/// Before-capture and before-drag-start are delivered immediately. Drag start and drag
/// updates are queued until [`flush`](Self::flush), and always flushed before the drag
/// end. A drag ends exactly once.
#[derive(Debug)]
pub struct Publisher {
    responders: Responders,
    live: Option<Live>,
    queue: VecDeque<Queued>,
}

impl Publisher {
    pub fn new(responders: Responders) -> Self {
        Self {
            responders,
            live: None,
            queue: VecDeque::new(),
        }
    }

    pub fn responders_mut(&mut self) -> &mut Responders {
        &mut self.responders
    }

    /// Whether a drag has started and not yet ended.
    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }

    /// Whether queued notifications are waiting for a flush.
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn before_capture(&mut self, payload: &BeforeCapture) {
        if let Some(handler) = self.responders.on_before_capture.as_mut() {
            handler(payload);
        }
    }

    pub fn before_start(&mut self, start: &DragStart) {
        if let Some(handler) = self.responders.on_before_drag_start.as_mut() {
            handler(start);
        }
    }

    pub fn start(&mut self, critical: &Critical, mode: MovementMode) {
        if self.live.is_some() {
            dwarn!(
                draggable_id = %critical.draggable.id,
                "drag start while a drag is live; ignoring"
            );
            return;
        }
        self.live = Some(Live {
            critical: critical.clone(),
            mode,
            last_destination: Some(critical.source()),
            last_combine: None,
        });
        self.queue
            .push_back(Queued::Start(DragStart::from_critical(critical, mode)));
    }

    /// Queues a drag update if the destination, combine or critical changed.
    pub fn update(&mut self, critical: &Critical, impact: &DragImpact) {
        let Some(live) = self.live.as_mut() else {
            return;
        };
        let destination = impact.destination().cloned();
        let combine = impact.combine().cloned();
        if live.critical == *critical
            && live.last_destination == destination
            && live.last_combine == combine
        {
            return;
        }
        live.critical = critical.clone();
        live.last_destination = destination.clone();
        live.last_combine = combine.clone();
        let start = DragStart::from_critical(critical, live.mode);
        self.queue
            .push_back(Queued::Update(DragUpdate::new(start, destination, combine)));
    }

    /// Delivers queued notifications in order.
    pub fn flush(&mut self) {
        while let Some(queued) = self.queue.pop_front() {
            let mut announce = Announce::new();
            let default = match &queued {
                Queued::Start(start) => {
                    if let Some(handler) = self.responders.on_drag_start.as_mut() {
                        handler(start, &mut announce);
                    }
                    default_start_message(start)
                }
                Queued::Update(update) => {
                    if let Some(handler) = self.responders.on_drag_update.as_mut() {
                        handler(update, &mut announce);
                    }
                    default_update_message(update)
                }
            };
            self.announce(announce, default);
        }
    }

    /// Ends the live drag with `result`. Later calls for the same drag are ignored.
    pub fn end(&mut self, result: &DropResult) {
        if self.live.is_none() {
            dwarn!(draggable_id = %result.draggable_id, "drag end without a live drag; ignoring");
            return;
        }
        self.flush();
        self.live = None;
        let mut announce = Announce::new();
        if let Some(handler) = self.responders.on_drag_end.as_mut() {
            handler(result, &mut announce);
        }
        self.announce(announce, default_end_message(result));
        ddebug!(
            draggable_id = %result.draggable_id,
            reason = result.reason.as_str(),
            "drag end published"
        );
    }

    /// Ends a live drag as cancelled, if there is one.
    pub fn abort(&mut self) {
        let Some(live) = self.live.as_ref() else {
            return;
        };
        let result = DropResult::cancelled(&live.critical, live.mode);
        self.end(&result);
    }

    fn announce(&mut self, announce: Announce, default: String) {
        let message = announce.into_message().unwrap_or(default);
        if let Some(announcer) = self.responders.announcer.as_mut() {
            announcer(&message);
        }
    }
}
