use crate::page::{
    Page,
    Tag,
};

pub const TAG_DISPLAY_ID: &str = "content_tag_left";
pub const LINK_LABEL: &str = "Link";

const HIERARCHY_SEPARATOR: &str = "::";

/// "Computing::Machine_Learning" -> "Computing - Machine Learning"
pub fn prettify(tag: &str) -> String {
    tag.replace(HIERARCHY_SEPARATOR, " - ").replace('_', " ")
}

/// Turns Anki's space separated tag field into a sorted, comma separated label.
///
/// Runs of spaces produce empty tokens when split; those are dropped rather than rendered as
/// blank labels.
pub fn render_tags(tags: &str) -> String {
    let mut labels: Vec<String> =
        tags.split(' ').filter(|tag| !tag.trim().is_empty()).map(prettify).collect();
    labels.sort();
    labels.join(", ")
}

pub fn display_tags(page: &mut Page, tags: &str) {
    let Some(id) = page.element_by_id(TAG_DISPLAY_ID) else {
        return;
    };
    let rendered = render_tags(tags);
    if let Some(element) = page.element_mut(id) {
        element.text = rendered;
    }
}

pub fn set_link_text(page: &mut Page) {
    if let Some(anchor) = page.first_by_tag(&Tag::Anchor).and_then(|id| page.element_mut(id)) {
        anchor.text = LINK_LABEL.to_string();
    }
}
