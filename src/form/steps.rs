//! Flattening chapters and screens into one navigable sequence

use super::definition::{FormConfig, Screen};

/// A screen paired with the title of the chapter it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenedStep<'a> {
    pub screen: &'a Screen,
    pub chapter_title: &'a str,
    /// Index of the chapter in the definition
    pub chapter_index: usize,
    /// Index of the screen inside its chapter
    pub screen_index: usize,
}

/// Every screen of every chapter, chapter-major then screen order
pub fn flatten(config: &FormConfig) -> Vec<FlattenedStep<'_>> {
    config
        .chapters
        .iter()
        .enumerate()
        .flat_map(|(chapter_index, chapter)| {
            chapter
                .screens
                .iter()
                .enumerate()
                .map(move |(screen_index, screen)| FlattenedStep {
                    screen,
                    chapter_title: &chapter.title,
                    chapter_index,
                    screen_index,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::definition::Chapter;
    use pretty_assertions::assert_eq;

    fn screen(id: &str) -> Screen {
        Screen {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: None,
            questions: vec![],
        }
    }

    fn chapter(title: &str, screens: &[&str]) -> Chapter {
        Chapter {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: None,
            screens: screens.iter().map(|s| screen(s)).collect(),
        }
    }

    fn form(chapters: Vec<Chapter>) -> FormConfig {
        FormConfig {
            title: "Form".to_string(),
            description: String::new(),
            chapters,
        }
    }

    #[test]
    fn test_builtin_has_four_steps_in_order() {
        let config = FormConfig::builtin();
        let steps = flatten(&config);
        let ids: Vec<_> = steps.iter().map(|s| s.screen.id.as_str()).collect();
        assert_eq!(
            ids,
            ["basic-details", "demographics", "communication", "final-details"]
        );
        assert_eq!(steps[1].chapter_title, "Personal Information");
        assert_eq!(steps[2].chapter_title, "Preferences");
    }

    #[test]
    fn test_length_is_sum_of_screens() {
        let config = form(vec![
            chapter("A", &["a1", "a2", "a3"]),
            chapter("B", &[]),
            chapter("C", &["c1"]),
        ]);
        let steps = flatten(&config);
        let expected: usize = config.chapters.iter().map(|c| c.screens.len()).sum();
        assert_eq!(steps.len(), expected);
        let pairs: Vec<_> = steps
            .iter()
            .map(|s| (s.chapter_title, s.screen.id.as_str()))
            .collect();
        assert_eq!(pairs, [("A", "a1"), ("A", "a2"), ("A", "a3"), ("C", "c1")]);
    }

    #[test]
    fn test_steps_record_their_position() {
        let config = form(vec![
            chapter("A", &["a1"]),
            chapter("B", &[]),
            chapter("C", &["c1", "c2"]),
        ]);
        let positions: Vec<_> = flatten(&config)
            .iter()
            .map(|s| (s.chapter_index, s.screen_index))
            .collect();
        assert_eq!(positions, [(0, 0), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_no_chapters_yields_empty_sequence() {
        assert!(flatten(&form(vec![])).is_empty());
    }

    #[test]
    fn test_chapters_without_screens_yield_empty_sequence() {
        assert!(flatten(&form(vec![chapter("A", &[]), chapter("B", &[])])).is_empty());
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let config = FormConfig::builtin();
        assert_eq!(flatten(&config), flatten(&config));
    }
}
