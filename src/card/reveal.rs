use super::{
    capture::AnswerMap,
    normalize::{
        normalize,
        strip_whitespace,
    },
};
use crate::page::{
    FontWeight,
    Page,
    Rgb,
};

pub const CORRECT_COLOR: Rgb = Rgb(124, 232, 0);
pub const INCORRECT_COLOR: Rgb = Rgb(240, 128, 128);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealSummary {
    pub correct: usize,
    pub incorrect: usize,
}

impl RevealSummary {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }
}

/// Grades every named field against its name and replaces the typed text with the true answer.
///
/// Only the submitted side is quote-normalized; the true answer just loses its whitespace.
pub fn reveal(page: &mut Page, submitted: &AnswerMap) -> RevealSummary {
    let mut summary = RevealSummary::default();

    for id in page.inputs() {
        let Some(field) = page.element_mut(id) else {
            continue;
        };
        let Some(true_answer) = field.field_name().map(str::to_string) else {
            continue;
        };

        let expected = strip_whitespace(&true_answer);
        let actual = normalize(submitted.get(&true_answer).map(String::as_str).unwrap_or(""));

        if actual == expected {
            field.style.background_color = Some(CORRECT_COLOR);
            summary.correct += 1;
        } else {
            field.style.background_color = Some(INCORRECT_COLOR);
            summary.incorrect += 1;
        }
        field.value = true_answer;
        field.style.font_weight = Some(FontWeight::Bold);
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{
        Element,
        Style,
    };

    fn answers(pairs: &[(&str, &str)]) -> AnswerMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_colors_and_values() {
        let mut page = Page::new()
            .with_elements([Element::input().with_name("A B"), Element::input().with_name("C")]);

        let summary = reveal(&mut page, &answers(&[("A B", " A B "), ("C", "c")]));
        assert_eq!(summary, RevealSummary { correct: 1, incorrect: 1 });

        let inputs = page.inputs();
        let first = page.element(inputs[0]).unwrap();
        assert_eq!(first.style.background_color, Some(CORRECT_COLOR));
        assert_eq!(first.style.background_color.unwrap().to_string(), "rgb(124, 232, 0)");
        assert_eq!(first.value, "A B");
        assert_eq!(first.style.font_weight, Some(FontWeight::Bold));

        let second = page.element(inputs[1]).unwrap();
        assert_eq!(second.style.background_color, Some(INCORRECT_COLOR));
        assert_eq!(second.value, "C");
        assert_eq!(second.style.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_skips_unnamed_fields() {
        let mut page = Page::new().with_elements([
            Element::input().with_name("A"),
            Element::input().with_value("typed"),
        ]);

        let summary = reveal(&mut page, &answers(&[("A", "A")]));
        assert_eq!(summary.total(), 1);

        let inputs = page.inputs();
        assert_eq!(page.element(inputs[0]).unwrap().style.background_color, Some(CORRECT_COLOR));
        let unnamed = page.element(inputs[1]).unwrap();
        assert_eq!(unnamed.style, Style::default());
        assert_eq!(unnamed.value, "typed");
    }

    #[test]
    fn test_missing_answer_is_wrong() {
        let mut page = Page::new().with_elements([Element::input().with_name("x")]);
        let summary = reveal(&mut page, &AnswerMap::new());
        assert_eq!(summary.incorrect, 1);
        assert_eq!(page.element(page.inputs()[0]).unwrap().value, "x");
    }

    #[test]
    fn test_quotes_only_normalized_on_submission() {
        let mut page = Page::new().with_elements([
            Element::input().with_name("print(\"hi\")"),
            Element::input().with_name("\u{201C}smart\u{201D}"),
        ]);

        let summary = reveal(
            &mut page,
            &answers(&[
                ("print(\"hi\")", "print(\u{201C}hi\u{201D})"),
                ("\u{201C}smart\u{201D}", "\u{201C}smart\u{201D}"),
            ]),
        );
        assert_eq!(summary, RevealSummary { correct: 1, incorrect: 1 });
    }

    #[test]
    fn test_idempotent() {
        let build = || {
            Page::new().with_elements([
                Element::input().with_name("A B"),
                Element::input().with_name("C"),
                Element::input(),
            ])
        };
        let submitted = answers(&[("A B", "AB"), ("C", "d")]);

        let mut once = build();
        reveal(&mut once, &submitted);
        let mut twice = build();
        reveal(&mut twice, &submitted);
        reveal(&mut twice, &submitted);

        for id in once.inputs() {
            assert_eq!(once.element(id), twice.element(id));
        }
    }
}
