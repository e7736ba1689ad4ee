use std::rc::Rc;

use super::{
    ElementId,
    Page,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Document,
    Element(ElementId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Input,
    KeyDown,
    TouchStart,
    MouseDown,
    ContentLoaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Input,
    KeyDown { key: String },
    TouchStart,
    MouseDown,
    ContentLoaded,
}

impl EventKind {
    pub fn key_down(key: &str) -> Self {
        EventKind::KeyDown { key: key.to_string() }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            EventKind::Input => EventType::Input,
            EventKind::KeyDown { .. } => EventType::KeyDown,
            EventKind::TouchStart => EventType::TouchStart,
            EventKind::MouseDown => EventType::MouseDown,
            EventKind::ContentLoaded => EventType::ContentLoaded,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Event {
    pub target: Target,
    pub kind: EventKind,
    default_prevented: bool,
}

impl Event {
    pub fn new(target: Target, kind: EventKind) -> Self {
        Self { target, kind, default_prevented: false }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Callback invoked synchronously by [`Page::dispatch`].
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event)>;

pub(crate) struct Subscription {
    pub target: Target,
    pub event_type: EventType,
    pub listener: Listener,
}
