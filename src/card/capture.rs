use std::{
    cell::RefCell,
    collections::HashMap,
    rc::Rc,
};

use crate::page::{
    EventType,
    Page,
    Target,
};

/// Plain name -> typed value snapshot.
pub type AnswerMap = HashMap<String, String>;

/// Live record of what the user has typed into each named field.
///
/// Clones share the same map; listeners installed by [`capture`] keep writing into it for as
/// long as the page lives, so reads always see the latest value.
#[derive(Debug, Clone, Default)]
pub struct CapturedAnswers {
    inner: Rc<RefCell<AnswerMap>>,
}

impl CapturedAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner.borrow().get(name).cloned()
    }

    pub fn snapshot(&self) -> AnswerMap {
        self.inner.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub(crate) fn record(&self, name: &str, value: &str) {
        self.inner.borrow_mut().insert(name.to_string(), value.to_string());
    }
}

/// Seeds the map from every named field and keeps it updated on each edit.
///
/// Fields without a name are neither recorded nor subscribed.
pub fn capture(page: &mut Page) -> CapturedAnswers {
    let answers = CapturedAnswers::new();

    for id in page.inputs() {
        let Some((name, value)) = page
            .element(id)
            .and_then(|field| field.field_name().map(|name| (name.to_string(), field.value.clone())))
        else {
            continue;
        };

        answers.record(&name, &value);

        let sink = answers.clone();
        page.add_listener(Target::Element(id), EventType::Input, move |page, _| {
            if let Some(field) = page.element(id) {
                sink.record(&name, &field.value);
            }
        });
    }

    answers
}
