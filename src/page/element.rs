use std::{
    collections::BTreeMap,
    fmt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Input,
    Anchor,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

/// `None` in [`Style`] leaves the page's own weight in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Bold,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub background_color: Option<Rgb>,
    pub font_weight: Option<FontWeight>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: Tag,
    pub id: Option<String>,
    pub name: Option<String>,
    pub value: String,
    pub text: String,
    pub class_name: String,
    pub attributes: BTreeMap<String, String>,
    pub style: Style,
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            name: None,
            value: String::new(),
            text: String::new(),
            class_name: String::new(),
            attributes: BTreeMap::new(),
            style: Style::default(),
        }
    }

    pub fn input() -> Self {
        Self::new(Tag::Input)
    }

    pub fn anchor() -> Self {
        Self::new(Tag::Anchor)
    }

    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    /// The field name, if it is set and non-empty.
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, key: &str, value: &str) {
        self.attributes.insert(key.to_string(), value.to_string());
    }
}
