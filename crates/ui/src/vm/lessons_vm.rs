use hydro_core::LessonCatalog;
use hydro_core::model::{LessonId, Progression};

/// Display data for one lesson card in the dashboard and list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonCard {
    pub id: LessonId,
    pub number: usize,
    pub title: String,
    pub description: String,
    pub category: &'static str,
    pub duration: String,
    pub unlocked: bool,
    pub completed: bool,
}

/// Builds the card list, filtered by a case-insensitive search query over
/// title, description, and category.
#[must_use]
pub fn lesson_cards(
    catalog: &LessonCatalog,
    progression: &Progression,
    query: &str,
) -> Vec<LessonCard> {
    let query = query.trim().to_lowercase();

    catalog
        .lessons()
        .iter()
        .enumerate()
        .filter(|(_, lesson)| {
            if query.is_empty() {
                return true;
            }
            lesson.title().to_lowercase().contains(&query)
                || lesson.description().to_lowercase().contains(&query)
                || lesson.category().label().to_lowercase().contains(&query)
        })
        .map(|(index, lesson)| LessonCard {
            id: lesson.id(),
            number: index + 1,
            title: lesson.title().to_string(),
            description: lesson.description().to_string(),
            category: lesson.category().label(),
            duration: lesson.duration_label().to_string(),
            unlocked: progression.is_unlocked(lesson.id()),
            completed: progression.is_completed(lesson.id()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (LessonCatalog, Progression) {
        let catalog = LessonCatalog::builtin();
        let progression = Progression::new(&catalog);
        (catalog, progression)
    }

    #[test]
    fn empty_query_lists_every_lesson_in_order() {
        let (catalog, progression) = fixtures();
        let cards = lesson_cards(&catalog, &progression, "");

        assert_eq!(cards.len(), catalog.lessons().len());
        assert_eq!(cards[0].number, 1);
        assert!(cards[0].unlocked);
        assert!(!cards[1].unlocked);
    }

    #[test]
    fn query_matches_title_description_and_category() {
        let (catalog, progression) = fixtures();

        let by_title = lesson_cards(&catalog, &progression, "nft");
        assert_eq!(by_title.len(), 1);
        assert!(by_title[0].title.contains("NFT"));

        let by_category = lesson_cards(&catalog, &progression, "technology");
        assert_eq!(by_category.len(), 1);

        let none = lesson_cards(&catalog, &progression, "blockchain");
        assert!(none.is_empty());
    }

    #[test]
    fn completion_flags_follow_progression() {
        let (catalog, mut progression) = fixtures();
        let first = catalog.lessons()[0].id();
        progression.apply_module_result(&catalog, first, 100).unwrap();

        let cards = lesson_cards(&catalog, &progression, "");
        assert!(cards[0].completed);
        assert!(cards[1].unlocked);
        assert!(!cards[1].completed);
    }
}
