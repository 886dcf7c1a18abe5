//! The polymorphic seam between the host event loop and the widgets
//!
//! Every interactive widget takes host events and timer ticks and reports
//! [`Changes`]. The host keeps one loop for all of them: deliver the event,
//! dispatch the resulting notifications, sleep until the earliest deadline.

use std::time::Instant;

use crate::changes::Changes;
use crate::input::InputEvent;
use crate::list::ListView;
use crate::notify::{Dispatcher, WidgetId};
use crate::scroll::ScrollAxis;
use crate::text_box::{TextBox, TextMeasure};

pub trait Interactive {
    /// Apply one input event in control-local coordinates
    fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes;

    /// Perform timer work that came due up to `now`
    fn tick(&mut self, now: Instant) -> Changes;

    /// When the host should call [`tick`](Self::tick) next
    fn next_deadline(&self) -> Option<Instant>;
}

impl Interactive for ScrollAxis {
    fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        match *event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button, now),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { .. } | InputEvent::FocusLost => self.pointer_up(),
            InputEvent::PointerLeave => self.pointer_leave(),
            _ => Changes::NONE,
        }
    }

    fn tick(&mut self, now: Instant) -> Changes {
        ScrollAxis::tick(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        ScrollAxis::next_deadline(self)
    }
}

impl Interactive for ListView {
    fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        ListView::handle_event(self, event, now)
    }

    fn tick(&mut self, now: Instant) -> Changes {
        ListView::tick(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        ListView::next_deadline(self)
    }
}

impl<M: TextMeasure> Interactive for TextBox<M> {
    fn handle_event(&mut self, event: &InputEvent, now: Instant) -> Changes {
        TextBox::handle_event(self, event, now)
    }

    fn tick(&mut self, now: Instant) -> Changes {
        TextBox::tick(self, now)
    }

    fn next_deadline(&self) -> Option<Instant> {
        TextBox::next_deadline(self)
    }
}

/// Deliver one event and notify subscribers of what changed
pub fn deliver(
    widget: &mut dyn Interactive,
    id: WidgetId,
    event: &InputEvent,
    now: Instant,
    dispatcher: &mut Dispatcher,
) -> Changes {
    let changes = widget.handle_event(event, now);
    dispatcher.dispatch(id, changes);
    changes
}

/// Tick every widget and notify subscribers; returns the earliest next
/// deadline across all of them
pub fn tick_all(
    widgets: &mut [(WidgetId, &mut dyn Interactive)],
    now: Instant,
    dispatcher: &mut Dispatcher,
) -> Option<Instant> {
    for (id, widget) in widgets.iter_mut() {
        let changes = widget.tick(now);
        dispatcher.dispatch(*id, changes);
    }
    crate::timer::earliest(widgets.iter().map(|(_, w)| w.next_deadline()))
}
