//! Event detail formatting and the actions offered on an event.

use chrono_tz::Tz;
use serde::Serialize;

use crate::event::{CalendarEvent, EventCategory};

/// Everything the detail popover shows for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    pub title: String,
    /// e.g. "Tuesday 3 March 2026 at 10:00"
    pub date_label: String,
    /// e.g. "10:00 - 11:30"
    pub time_range: String,
    pub category_label: String,
    pub squad: Option<String>,
    /// Only for recurring events.
    pub recurrence: Option<String>,
}

/// Actions offered on an event. The presenter forwards them and does nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAction {
    Edit,
    Delete,
    Duplicate,
    MoreDetails,
}

impl EventAction {
    pub const ALL: [EventAction; 4] = [
        EventAction::Edit,
        EventAction::Delete,
        EventAction::Duplicate,
        EventAction::MoreDetails,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EventAction::Edit => "Edit",
            EventAction::Delete => "Delete",
            EventAction::Duplicate => "Duplicate",
            EventAction::MoreDetails => "More details",
        }
    }
}

/// Receiver for dispatched actions, supplied by whoever owns the events.
pub trait ActionHandler {
    fn handle(&mut self, action: EventAction, event: &CalendarEvent);
}

impl<F> ActionHandler for F
where
    F: FnMut(EventAction, &CalendarEvent),
{
    fn handle(&mut self, action: EventAction, event: &CalendarEvent) {
        self(action, event)
    }
}

pub struct EventPresenter<'a> {
    event: &'a CalendarEvent,
    tz: Tz,
}

impl<'a> EventPresenter<'a> {
    /// Times are shown in `tz`.
    pub fn new(event: &'a CalendarEvent, tz: Tz) -> Self {
        EventPresenter { event, tz }
    }

    pub fn event(&self) -> &'a CalendarEvent {
        self.event
    }

    pub fn date_label(&self) -> String {
        self.event
            .start
            .with_timezone(&self.tz)
            .format("%A %-d %B %Y at %H:%M")
            .to_string()
    }

    pub fn time_range(&self) -> String {
        let start = self.event.start.with_timezone(&self.tz);
        let end = self.event.end.with_timezone(&self.tz);
        format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
    }

    pub fn category_label(&self) -> &'a str {
        self.event.category.label()
    }

    /// Recurring events repeat on the weekday of their start.
    pub fn recurrence(&self) -> Option<String> {
        match self.event.category {
            EventCategory::RecurringEvent => {
                let start = self.event.start.with_timezone(&self.tz);
                Some(format!("Every {}", start.format("%A")))
            }
            _ => None,
        }
    }

    pub fn details(&self) -> EventDetails {
        let squad = &self.event.extended.squad;
        EventDetails {
            title: self.event.title.clone(),
            date_label: self.date_label(),
            time_range: self.time_range(),
            category_label: self.category_label().to_string(),
            squad: (!squad.is_empty()).then(|| squad.to_string()),
            recurrence: self.recurrence(),
        }
    }

    pub fn dispatch(&self, action: EventAction, handler: &mut impl ActionHandler) {
        tracing::debug!(action = action.label(), id = %self.event.id, "dispatching event action");
        handler.handle(action, self.event);
    }

    pub fn edit(&self, handler: &mut impl ActionHandler) {
        self.dispatch(EventAction::Edit, handler);
    }

    pub fn delete(&self, handler: &mut impl ActionHandler) {
        self.dispatch(EventAction::Delete, handler);
    }

    pub fn duplicate(&self, handler: &mut impl ActionHandler) {
        self.dispatch(EventAction::Duplicate, handler);
    }

    pub fn more_details(&self, handler: &mut impl ActionHandler) {
        self.dispatch(EventAction::MoreDetails, handler);
    }
}
