//! Notification dispatch at the widget boundary
//!
//! The painting layer subscribes here. Widgets only return [`Changes`]; the
//! host hands those to [`Dispatcher::dispatch`] once per processed event.

use crate::changes::Changes;

/// Identifies which widget a notification came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u32);

/// A single change notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    ScrollChanged,
    SelectionChanged,
    TextChanged,
    CaretMoved,
    CaretVisibilityToggled,
    ItemsChanged,
    InteractionChanged,
    ItemInvoked(usize),
}

impl Notification {
    /// Expand a change set into notifications, in a fixed order
    pub fn from_changes(changes: Changes) -> Vec<Notification> {
        let mut out = Vec::new();
        let table = [
            (Changes::ITEMS, Notification::ItemsChanged),
            (Changes::TEXT, Notification::TextChanged),
            (Changes::SCROLL, Notification::ScrollChanged),
            (Changes::SELECTION, Notification::SelectionChanged),
            (Changes::CARET, Notification::CaretMoved),
            (Changes::CARET_VISIBILITY, Notification::CaretVisibilityToggled),
            (Changes::INTERACTION, Notification::InteractionChanged),
        ];
        for (flag, note) in table {
            if changes.contains(flag) {
                out.push(note);
            }
        }
        if let Some(index) = changes.invoked {
            out.push(Notification::ItemInvoked(index));
        }
        out
    }
}

type Handler = Box<dyn FnMut(WidgetId, Notification)>;

/// Subscriber registry. Single-threaded; handlers run synchronously.
#[derive(Default)]
pub struct Dispatcher {
    handlers: Vec<Handler>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(WidgetId, Notification) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Raise every notification in `changes` to every subscriber.
    ///
    /// Returns how many notifications were raised.
    pub fn dispatch(&mut self, widget: WidgetId, changes: Changes) -> usize {
        let notes = Notification::from_changes(changes);
        if notes.is_empty() {
            return 0;
        }
        tracing::trace!(widget = widget.0, %changes, "dispatch");
        for note in &notes {
            for handler in &mut self.handlers {
                handler(widget, *note);
            }
        }
        notes.len()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
