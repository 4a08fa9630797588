use std::collections::BTreeSet;
use thiserror::Error;

use crate::model::{
    Lesson, LessonCategory, LessonError, LessonId, Question, QuestionError, QuestionId,
};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("a catalog needs at least one lesson")]
    Empty,

    #[error("duplicate lesson id {0}")]
    DuplicateLessonId(LessonId),

    #[error("duplicate question id {0} across the catalog")]
    DuplicateQuestionId(QuestionId),

    #[error(transparent)]
    Lesson(#[from] LessonError),

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// Read-only provider for the curriculum: the ordered lesson list and the
/// full question bank.
///
/// Question ids must be globally unique across lessons — the final exam is
/// the flat concatenation of every lesson's questions, and a shared id would
/// make answer-map entries collide. `new` enforces this as a data-integrity
/// precondition so the quiz engine never has to.
#[derive(Debug, Clone, PartialEq)]
pub struct LessonCatalog {
    lessons: Vec<Lesson>,
}

impl LessonCatalog {
    /// Builds a catalog from an ordered lesson list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for an empty list or duplicate lesson/question
    /// ids.
    pub fn new(lessons: Vec<Lesson>) -> Result<Self, CatalogError> {
        if lessons.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut lesson_ids = BTreeSet::new();
        let mut question_ids = BTreeSet::new();
        for lesson in &lessons {
            if !lesson_ids.insert(lesson.id()) {
                return Err(CatalogError::DuplicateLessonId(lesson.id()));
            }
            for question in lesson.questions() {
                if !question_ids.insert(question.id()) {
                    return Err(CatalogError::DuplicateQuestionId(question.id()));
                }
            }
        }

        Ok(Self { lessons })
    }

    /// The embedded hydroponics curriculum.
    ///
    /// # Panics
    ///
    /// Panics if the embedded dataset fails validation, which would be a
    /// defect in the dataset itself.
    #[must_use]
    pub fn builtin() -> Self {
        builtin_catalog().expect("builtin catalog should be valid")
    }

    /// Lessons in curriculum order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id() == id)
    }

    /// Zero-based curriculum position of a lesson.
    #[must_use]
    pub fn position_of(&self, id: LessonId) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.id() == id)
    }

    /// The lesson immediately after `id` in curriculum order, if any.
    ///
    /// Catalog order is the single source of truth for unlock gating; there
    /// is no other notion of "next".
    #[must_use]
    pub fn successor_of(&self, id: LessonId) -> Option<&Lesson> {
        let index = self.position_of(id)?;
        self.lessons.get(index + 1)
    }

    /// Every question across the catalog, lesson order preserved, question
    /// order within each lesson preserved. This is the final-exam set.
    #[must_use]
    pub fn all_questions(&self) -> Vec<Question> {
        self.lessons
            .iter()
            .flat_map(|lesson| lesson.questions().iter().cloned())
            .collect()
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.lessons.iter().map(|lesson| lesson.questions().len()).sum()
    }
}

fn question(
    id: u64,
    prompt: &str,
    options: [&str; 4],
    correct: usize,
) -> Result<Question, QuestionError> {
    Question::new(
        QuestionId::new(id),
        prompt,
        options.iter().map(ToString::to_string).collect(),
        correct,
    )
}

#[allow(clippy::too_many_lines)]
fn builtin_catalog() -> Result<LessonCatalog, CatalogError> {
    let lessons = vec![
        Lesson::new(
            LessonId::new(1),
            "Hydroponics Fundamentals",
            "A complete beginner's path into soilless growing.",
            "Hydroponics is farming without soil: roots sit in a controlled \
             nutrient solution, which lets you dose feeding with precision \
             instead of guessing what the ground holds.\n\n\
             This module covers the starter equipment list, picking a spot \
             with stable light and temperature, and how a plant's life cycle \
             maps onto a water-based system.",
            LessonCategory::Basics,
            "12 min",
            Some("https://www.youtube.com/watch?v=XT9fmv79h2Y".to_string()),
            vec![
                question(
                    101,
                    "What is the main advantage of hydroponics over conventional farming?",
                    [
                        "It uses more soil",
                        "Precise control over nutrients",
                        "It only works outdoors",
                        "It needs more pesticides",
                    ],
                    1,
                )?,
                question(
                    102,
                    "Which growing medium is never used in hydroponics?",
                    ["Water", "Rockwool", "Clay soil", "Cocopeat"],
                    2,
                )?,
            ],
        )?,
        Lesson::new(
            LessonId::new(2),
            "NFT Systems (Nutrient Film Technique)",
            "How the water-efficient NFT channel design works.",
            "In a Nutrient Film Technique system, a thin film of nutrient \
             solution runs continuously along the bottom of a shallow \
             channel. Roots get a balanced supply of both oxygen and \
             nutrients because the film never submerges them.\n\n\
             NFT shines for leafy greens such as lettuce and spinach, where \
             fast, even growth matters more than structural support.",
            LessonCategory::Systems,
            "18 min",
            Some("https://www.youtube.com/watch?v=XT9fmv79h2Y".to_string()),
            vec![
                question(
                    201,
                    "How does the nutrient solution flow in an NFT system?",
                    [
                        "Deep standing pool",
                        "Thin continuous film",
                        "Periodic drip bursts",
                        "Suspended mist",
                    ],
                    1,
                )?,
                question(
                    202,
                    "Which crops suit an NFT channel best?",
                    ["Root vegetables", "Leafy greens", "Large trees", "Cacti"],
                    1,
                )?,
            ],
        )?,
        Lesson::new(
            LessonId::new(3),
            "Smart Irrigation and IoT",
            "Sensor-driven watering that reacts to the crop, not the clock.",
            "Moisture and pH probes feed a microcontroller that opens the \
             valves only when plants actually need water. That closed loop — \
             measure, decide, actuate — is the core of precision agriculture, \
             and it cuts water use dramatically compared with timed dosing.",
            LessonCategory::Technology,
            "25 min",
            Some("https://www.youtube.com/watch?v=XT9fmv79h2Y".to_string()),
            vec![question(
                301,
                "What is the primary role of sensors in smart irrigation?",
                [
                    "Coloring the water",
                    "Detecting what the crop needs",
                    "Cutting household power",
                    "Force-ripening the harvest",
                ],
                1,
            )?],
        )?,
        Lesson::new(
            LessonId::new(4),
            "AB-Mix Nutrient Management",
            "Mixing concentrates so plants get exactly what each phase needs.",
            "Nutrient solution is the entire diet of a hydroponic crop. This \
             module walks through dissolving the A and B concentrates \
             separately, why mixing them neat causes lockout, and how to \
             verify strength with a TDS meter for every growth phase.",
            LessonCategory::Nutrients,
            "20 min",
            Some("https://www.youtube.com/watch?v=XT9fmv79h2Y".to_string()),
            vec![question(
                401,
                "Which instrument measures the strength of a nutrient solution?",
                ["pH meter", "TDS meter", "Thermometer", "Barometer"],
                1,
            )?],
        )?,
    ];

    LessonCatalog::new(lessons)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
