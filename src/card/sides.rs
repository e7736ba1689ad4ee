use std::rc::Rc;

use tracing::{
    debug,
    info,
    warn,
};

use super::{
    capture::{
        capture,
        CapturedAnswers,
    },
    handoff::AnswerStore,
    reveal::{
        reveal,
        RevealSummary,
    },
    tags::{
        display_tags,
        set_link_text,
    },
};
use crate::{
    core::{
        CardError,
        Side,
    },
    page::{
        EventKind,
        EventType,
        Page,
        Target,
    },
};

pub const HINT_ID: &str = "hint";
pub const HINT_SHOWN_CLASS: &str = "shown";
pub const SHOW_ANSWER_COMMAND: &str = "ans";
pub const SUBMIT_KEY: &str = "Enter";

/// Keeps phone keyboards from "correcting" typed code.
pub const MOBILE_INPUT_ATTRIBUTES: [(&str, &str); 4] = [
    ("autocapitalize", "off"),
    ("autocomplete", "off"),
    ("autocorrect", "off"),
    ("spellcheck", "false"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveMode {
    Capturing,
    Revealed,
    /// Answer side rendered without answers from the question side.
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideState {
    Unrendered,
    Initializing,
    Active(ActiveMode),
}

/// One rendered side of a card. A new render needs a new session.
#[derive(Debug)]
pub struct SideSession {
    side: Side,
    state: SideState,
    answers: Option<CapturedAnswers>,
    summary: Option<RevealSummary>,
}

impl SideSession {
    pub fn new(side: Side) -> Self {
        Self { side, state: SideState::Unrendered, answers: None, summary: None }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn state(&self) -> SideState {
        self.state
    }

    /// The live answer map; only the question side captures.
    pub fn answers(&self) -> Option<&CapturedAnswers> {
        self.answers.as_ref()
    }

    pub fn summary(&self) -> Option<RevealSummary> {
        self.summary
    }

    pub fn activate(
        &mut self,
        page: &mut Page,
        tags: &str,
        store: &Rc<dyn AnswerStore>,
    ) -> Result<(), CardError> {
        if self.state != SideState::Unrendered {
            return Err(CardError::SideAlreadyActive(self.side.label()));
        }
        self.state = SideState::Initializing;

        let mode = match self.side {
            Side::Question => self.init_question(page, tags, store),
            Side::Answer => self.init_answer(page, tags, store.as_ref()),
        };

        debug!("{} side active: {:?}", self.side, mode);
        self.state = SideState::Active(mode);
        Ok(())
    }

    fn init_question(
        &mut self,
        page: &mut Page,
        tags: &str,
        store: &Rc<dyn AnswerStore>,
    ) -> ActiveMode {
        // Capture first: the user may type before the rest of the document is parsed
        let answers = capture(page);
        stash_quietly(store.as_ref(), &answers);

        for id in page.inputs() {
            if page.element(id).and_then(|field| field.field_name()).is_none() {
                continue;
            }
            let store = Rc::clone(store);
            let answers = answers.clone();
            page.add_listener(Target::Element(id), EventType::Input, move |_, _| {
                stash_quietly(store.as_ref(), &answers);
            });
        }

        page.when_ready(|page| {
            set_input_attributes(page);
            place_cursor(page);
        });
        setup_hint(page);
        setup_submit_key(page);
        display_tags(page, tags);
        set_link_text(page);

        self.answers = Some(answers);
        ActiveMode::Capturing
    }

    fn init_answer(&mut self, page: &mut Page, tags: &str, store: &dyn AnswerStore) -> ActiveMode {
        let mode = match store.retrieve() {
            Ok(Some(submitted)) => {
                // Answers belong to one render; a later answer side must not grade against them
                if let Err(e) = store.clear() {
                    warn!("Could not clear submitted answers: {}", e);
                }
                let summary = reveal(page, &submitted);
                info!("Revealed {} answers, {} correct", summary.total(), summary.correct);
                self.summary = Some(summary);
                ActiveMode::Revealed
            }
            Ok(None) => ActiveMode::Static,
            Err(e) => {
                warn!("Could not retrieve submitted answers: {}", e);
                ActiveMode::Static
            }
        };

        display_tags(page, tags);
        set_link_text(page);
        mode
    }
}

fn stash_quietly(store: &dyn AnswerStore, answers: &CapturedAnswers) {
    if let Err(e) = store.stash(answers) {
        warn!("Could not stash captured answers: {}", e);
    }
}

pub fn set_input_attributes(page: &mut Page) {
    for id in page.inputs() {
        if let Some(field) = page.element_mut(id) {
            for (key, value) in MOBILE_INPUT_ATTRIBUTES {
                field.set_attribute(key, value);
            }
        }
    }
}

pub fn place_cursor(page: &mut Page) {
    if let Some(first) = page.inputs().first() {
        page.focus(*first);
    }
}

pub fn setup_hint(page: &mut Page) {
    let Some(hint) = page.element_by_id(HINT_ID) else {
        return;
    };

    for event_type in [EventType::TouchStart, EventType::MouseDown] {
        page.add_listener(Target::Element(hint), event_type, move |page, _| {
            if let Some(element) = page.element_mut(hint) {
                element.class_name = HINT_SHOWN_CLASS.to_string();
            }
        });
    }
}

/// Enter asks the host to flip to the answer side. Without a host channel the key is still
/// swallowed.
pub fn setup_submit_key(page: &mut Page) {
    page.add_listener(Target::Document, EventType::KeyDown, |page, event| {
        let is_submit = matches!(&event.kind, EventKind::KeyDown { key } if key == SUBMIT_KEY);
        if !is_submit {
            return;
        }

        event.prevent_default();
        if let Some(host) = page.host_command() {
            host(SHOW_ANSWER_COMMAND);
        }
    });
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{
        card::{
            handoff::{
                JsonFileStore,
                SessionStore,
            },
            reveal::{
                CORRECT_COLOR,
                INCORRECT_COLOR,
            },
            tags::TAG_DISPLAY_ID,
        },
        page::{
            Element,
            ElementId,
            FontWeight,
            Style,
        },
    };

    fn card_page(loading: bool) -> Page {
        let page = if loading { Page::loading() } else { Page::new() };
        page.with_elements([
            Element::div().with_id(TAG_DISPLAY_ID),
            Element::anchor().with_text("https://docs.python.org"),
            Element::div().with_id(HINT_ID),
            Element::input().with_name("len(xs)"),
            Element::input(),
            Element::input().with_name("A B"),
        ])
    }

    fn session_store() -> Rc<dyn AnswerStore> {
        Rc::new(SessionStore::new())
    }

    fn text_of(page: &Page, id: &str) -> String {
        let id = page.element_by_id(id).unwrap();
        page.element(id).unwrap().text.clone()
    }

    #[test]
    fn test_question_side_setup() {
        let mut page = card_page(false);
        let store = session_store();
        let mut session = SideSession::new(Side::Question);
        assert_eq!(session.state(), SideState::Unrendered);

        session.activate(&mut page, "Python::Built_ins basics", &store).unwrap();
        assert_eq!(session.state(), SideState::Active(ActiveMode::Capturing));

        let inputs = page.inputs();
        assert_eq!(page.focused(), Some(inputs[0]));
        for id in &inputs {
            let field = page.element(*id).unwrap();
            assert_eq!(field.attribute("autocapitalize"), Some("off"));
            assert_eq!(field.attribute("autocomplete"), Some("off"));
            assert_eq!(field.attribute("autocorrect"), Some("off"));
            assert_eq!(field.attribute("spellcheck"), Some("false"));
        }

        assert_eq!(text_of(&page, TAG_DISPLAY_ID), "Python - Built ins, basics");
        let anchor = page.first_by_tag(&crate::page::Tag::Anchor).unwrap();
        assert_eq!(page.element(anchor).unwrap().text, "Link");

        // Unnamed fields get no listeners at all
        assert_eq!(page.listener_count(Target::Element(inputs[1])), 0);
        assert_eq!(session.answers().unwrap().len(), 2);
    }

    #[test]
    fn test_capture_starts_before_parsing_finishes() {
        let mut page = card_page(true);
        let store = session_store();
        let mut session = SideSession::new(Side::Question);
        session.activate(&mut page, "", &store).unwrap();

        let inputs = page.inputs();
        page.type_text(inputs[0], "3");
        assert_eq!(session.answers().unwrap().get("len(xs)").as_deref(), Some("3"));

        assert_eq!(page.focused(), None);
        assert_eq!(page.element(inputs[0]).unwrap().attribute("spellcheck"), None);

        page.finish_loading();
        assert_eq!(page.focused(), Some(inputs[0]));
        assert_eq!(page.element(inputs[0]).unwrap().attribute("spellcheck"), Some("false"));
    }

    #[test]
    fn test_deferred_and_immediate_setup_match() {
        let mut immediate = card_page(false);
        SideSession::new(Side::Question).activate(&mut immediate, "a", &session_store()).unwrap();

        let mut deferred = card_page(true);
        SideSession::new(Side::Question).activate(&mut deferred, "a", &session_store()).unwrap();
        deferred.finish_loading();

        assert_eq!(immediate.focused(), deferred.focused());
        for (a, b) in immediate.inputs().into_iter().zip(deferred.inputs()) {
            assert_eq!(immediate.element(a), deferred.element(b));
        }
    }

    #[test]
    fn test_no_inputs_no_focus() {
        let mut page = Page::new().with_elements([Element::div().with_id(TAG_DISPLAY_ID)]);
        SideSession::new(Side::Question).activate(&mut page, "x", &session_store()).unwrap();
        assert_eq!(page.focused(), None);
    }

    #[test]
    fn test_hint_reveals_on_touch_and_mouse() {
        for kind in [EventKind::TouchStart, EventKind::MouseDown] {
            let mut page = card_page(false);
            SideSession::new(Side::Question).activate(&mut page, "", &session_store()).unwrap();

            let hint = page.element_by_id(HINT_ID).unwrap();
            assert_eq!(page.element(hint).unwrap().class_name, "");
            page.dispatch(Target::Element(hint), kind);
            assert_eq!(page.element(hint).unwrap().class_name, HINT_SHOWN_CLASS);
        }
    }

    #[test]
    fn test_enter_requests_answer() {
        let mut page = card_page(false);
        let sent = Rc::new(RefCell::new(Vec::<String>::new()));
        let sink = sent.clone();
        page.set_host_command(move |command| sink.borrow_mut().push(command.to_string()));
        SideSession::new(Side::Question).activate(&mut page, "", &session_store()).unwrap();

        let other = page.dispatch(Target::Document, EventKind::key_down("a"));
        assert!(!other.default_prevented());
        assert!(sent.borrow().is_empty());

        let enter = page.dispatch(Target::Document, EventKind::key_down(SUBMIT_KEY));
        assert!(enter.default_prevented());
        assert_eq!(*sent.borrow(), vec![SHOW_ANSWER_COMMAND.to_string()]);
    }

    #[test]
    fn test_enter_without_host_channel() {
        let mut page = card_page(false);
        SideSession::new(Side::Question).activate(&mut page, "", &session_store()).unwrap();

        let enter = page.dispatch(Target::Document, EventKind::key_down(SUBMIT_KEY));
        assert!(enter.default_prevented());
    }

    #[test]
    fn test_answer_side_reveals_question_input() {
        let store = session_store();

        let mut front = card_page(false);
        SideSession::new(Side::Question).activate(&mut front, "", &store).unwrap();
        let front_inputs = front.inputs();
        front.type_text(front_inputs[0], " len( xs ) ");
        front.type_text(front_inputs[2], "a b");

        let mut back = card_page(false);
        let mut session = SideSession::new(Side::Answer);
        session.activate(&mut back, "tag_one", &store).unwrap();

        assert_eq!(session.state(), SideState::Active(ActiveMode::Revealed));
        assert_eq!(session.summary(), Some(RevealSummary { correct: 1, incorrect: 1 }));

        let inputs = back.inputs();
        let first = back.element(inputs[0]).unwrap();
        assert_eq!(first.style.background_color, Some(CORRECT_COLOR));
        assert_eq!(first.value, "len(xs)");
        assert_eq!(first.style.font_weight, Some(FontWeight::Bold));

        assert_eq!(back.element(inputs[1]).unwrap().style, Style::default());

        let third = back.element(inputs[2]).unwrap();
        assert_eq!(third.style.background_color, Some(INCORRECT_COLOR));
        assert_eq!(third.value, "A B");

        assert_eq!(text_of(&back, TAG_DISPLAY_ID), "tag one");
    }

    #[test]
    fn test_answer_side_without_stored_answers() {
        let mut page = card_page(false);
        let mut session = SideSession::new(Side::Answer);
        session.activate(&mut page, "b a", &session_store()).unwrap();

        assert_eq!(session.state(), SideState::Active(ActiveMode::Static));
        assert_eq!(session.summary(), None);
        for id in page.inputs() {
            assert_eq!(page.element(id).unwrap().style, Style::default());
        }
        assert_eq!(text_of(&page, TAG_DISPLAY_ID), "a, b");
    }

    #[test]
    fn test_handoff_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store: Rc<dyn AnswerStore> = Rc::new(JsonFileStore::new(dir.path().join("answers.json")));

        let mut front = card_page(false);
        SideSession::new(Side::Question).activate(&mut front, "", &store).unwrap();
        front.type_text(front.inputs()[2], "A  B");
        drop(front);

        let mut back = card_page(false);
        let mut session = SideSession::new(Side::Answer);
        session.activate(&mut back, "", &store).unwrap();

        let field: ElementId = back.inputs()[2];
        assert_eq!(back.element(field).unwrap().style.background_color, Some(CORRECT_COLOR));
        assert_eq!(session.summary().unwrap().correct, 1);
    }

    #[test]
    fn test_stored_answers_consumed_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("answers.json");
        let store: Rc<dyn AnswerStore> = Rc::new(JsonFileStore::new(&path));

        let mut front = card_page(false);
        SideSession::new(Side::Question).activate(&mut front, "", &store).unwrap();
        front.type_text(front.inputs()[2], "A B");
        drop(front);

        let mut back = card_page(false);
        let mut first = SideSession::new(Side::Answer);
        first.activate(&mut back, "", &store).unwrap();
        assert_eq!(first.state(), SideState::Active(ActiveMode::Revealed));
        assert!(!path.exists());

        // A re-render without a new question side has nothing to grade
        let mut rerender = card_page(false);
        let mut later = SideSession::new(Side::Answer);
        later.activate(&mut rerender, "", &store).unwrap();
        assert_eq!(later.state(), SideState::Active(ActiveMode::Static));
        assert_eq!(later.summary(), None);
        for id in rerender.inputs() {
            assert_eq!(rerender.element(id).unwrap().style, Style::default());
        }
    }

    #[test]
    fn test_session_store_cleared_after_reveal() {
        let store = session_store();
        let mut front = card_page(false);
        SideSession::new(Side::Question).activate(&mut front, "", &store).unwrap();

        let mut back = card_page(false);
        SideSession::new(Side::Answer).activate(&mut back, "", &store).unwrap();
        assert_eq!(store.retrieve().unwrap(), None);
    }

    #[test]
    fn test_activate_once() {
        let mut page = card_page(false);
        let store = session_store();
        let mut session = SideSession::new(Side::Answer);
        session.activate(&mut page, "", &store).unwrap();

        assert!(matches!(
            session.activate(&mut page, "", &store),
            Err(CardError::SideAlreadyActive("answer"))
        ));
    }
}
