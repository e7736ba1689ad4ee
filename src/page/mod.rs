//! In-process model of the document a card side is rendered into.
//!
//! The study tool owns the real document; this model exposes the same surface the card
//! behavior needs: element lookup, explicit event subscription and dispatch, the parse state of
//! the document and an optional one-way command channel back to the host.

use std::rc::Rc;

pub mod element;
pub mod events;

pub use element::{
    Element,
    ElementId,
    FontWeight,
    Rgb,
    Style,
    Tag,
};
pub use events::{
    Event,
    EventKind,
    EventType,
    Listener,
    Target,
};
use events::Subscription;

/// Command channel injected by the host (Anki's `pycmd`).
pub type HostCommand = Rc<dyn Fn(&str)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    Loading,
    Complete,
}

pub struct Page {
    elements: Vec<Element>,
    subscriptions: Vec<Subscription>,
    ready_state: ReadyState,
    focused: Option<ElementId>,
    host_command: Option<HostCommand>,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A fully parsed document.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
            subscriptions: Vec::new(),
            ready_state: ReadyState::Complete,
            focused: None,
            host_command: None,
        }
    }

    /// A document that is still being parsed; see [`Page::finish_loading`].
    pub fn loading() -> Self {
        Self { ready_state: ReadyState::Loading, ..Self::new() }
    }

    pub fn with_elements(mut self, elements: impl IntoIterator<Item = Element>) -> Self {
        for element in elements {
            self.append(element);
        }
        self
    }

    pub fn append(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements.iter().position(|e| e.id.as_deref() == Some(id)).map(ElementId)
    }

    pub fn elements_by_tag(&self, tag: &Tag) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| &e.tag == tag)
            .map(|(i, _)| ElementId(i))
            .collect()
    }

    pub fn first_by_tag(&self, tag: &Tag) -> Option<ElementId> {
        self.elements.iter().position(|e| &e.tag == tag).map(ElementId)
    }

    /// Every input element in document order, named or not.
    pub fn inputs(&self) -> Vec<ElementId> {
        self.elements_by_tag(&Tag::Input)
    }

    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    pub fn focus(&mut self, id: ElementId) {
        if self.element(id).is_some() {
            self.focused = Some(id);
        }
    }

    pub fn set_host_command(&mut self, command: impl Fn(&str) + 'static) {
        self.host_command = Some(Rc::new(command));
    }

    pub fn host_command(&self) -> Option<HostCommand> {
        self.host_command.clone()
    }

    pub fn add_listener(
        &mut self,
        target: Target,
        event_type: EventType,
        listener: impl Fn(&mut Page, &mut Event) + 'static,
    ) {
        self.subscriptions.push(Subscription { target, event_type, listener: Rc::new(listener) });
    }

    pub fn listener_count(&self, target: Target) -> usize {
        self.subscriptions.iter().filter(|s| s.target == target).count()
    }

    /// Runs every listener registered for `target` and the event's type, in registration order.
    ///
    /// Listeners added while dispatching are not run for the current event.
    pub fn dispatch(&mut self, target: Target, kind: EventKind) -> Event {
        let mut event = Event::new(target, kind);
        let event_type = event.kind.event_type();
        let listeners: Vec<Listener> = self
            .subscriptions
            .iter()
            .filter(|s| s.target == target && s.event_type == event_type)
            .map(|s| Rc::clone(&s.listener))
            .collect();

        for listener in listeners {
            listener(self, &mut event);
        }
        event
    }

    /// Runs `callback` now if the document is parsed, otherwise once parsing finishes.
    pub fn when_ready(&mut self, callback: impl Fn(&mut Page) + 'static) {
        match self.ready_state {
            ReadyState::Complete => callback(self),
            ReadyState::Loading => {
                self.add_listener(Target::Document, EventType::ContentLoaded, move |page, _| {
                    callback(page)
                });
            }
        }
    }

    pub fn finish_loading(&mut self) {
        if self.ready_state == ReadyState::Loading {
            self.ready_state = ReadyState::Complete;
            self.dispatch(Target::Document, EventKind::ContentLoaded);
        }
    }

    /// Replaces the value of a field and fires its `input` event, as a keystroke would.
    pub fn type_text(&mut self, id: ElementId, text: &str) {
        if let Some(element) = self.element_mut(id) {
            element.value = text.to_string();
            self.dispatch(Target::Element(id), EventKind::Input);
        }
    }
}
