use hydro_core::time::fixed_clock;
use services::{AppServices, QuizEngine};

fn answer_all(engine: &mut QuizEngine, wrong_ones: usize) {
    let mut remaining_wrong = wrong_ones;
    loop {
        let question = engine.current_question().clone();
        let choice = if remaining_wrong > 0 {
            remaining_wrong -= 1;
            (question.correct() + 1) % question.options().len()
        } else {
            question.correct()
        };
        engine.select_option(question.id(), choice).unwrap();
        if engine.can_advance() {
            engine.advance();
        } else {
            break;
        }
    }
}

#[tokio::test]
async fn full_curriculum_walk_ends_with_a_certificate() {
    let app = AppServices::new_in_memory(fixed_clock());
    let workflow = app.quiz_workflow();
    let progress = app.progress();
    let catalog = app.catalog();

    // Only the first lesson is open at the start.
    assert!(progress.is_unlocked(catalog.lessons()[0].id()));
    assert!(!progress.is_unlocked(catalog.lessons()[1].id()));

    // Pass each module quiz in curriculum order.
    for (index, lesson) in catalog.lessons().iter().enumerate() {
        let mut engine = workflow.start_module_quiz(lesson.id()).unwrap();
        answer_all(&mut engine, 0);
        let outcome = workflow.submit(&mut engine).unwrap();

        assert_eq!(outcome.score, 100);
        assert!(progress.is_completed(lesson.id()));
        let has_successor = index + 1 < catalog.lessons().len();
        assert_eq!(outcome.unlocked_title.is_some(), has_successor);
    }

    assert_eq!(progress.completion_percentage(), 100);
    assert!(progress.is_final_exam_eligible());

    // Three unlock notifications, newest first.
    let feed = app.notifications().snapshot();
    assert_eq!(feed.len(), 3);
    assert!(feed[0].text().contains(catalog.lessons()[3].title()));

    // The exam is the full six-question bank; 5/6 is not enough.
    let mut exam = workflow.start_final_exam().unwrap();
    assert_eq!(exam.total_questions(), 6);
    answer_all(&mut exam, 1);
    let failed = workflow.submit(&mut exam).unwrap();
    assert_eq!(failed.score, 83);
    assert!(!failed.final_exam_passed);
    assert!(progress.is_final_exam_eligible());

    // Retry on the same engine, perfect run.
    exam.retry().unwrap();
    answer_all(&mut exam, 0);
    let passed = workflow.submit(&mut exam).unwrap();
    assert_eq!(passed.score, 100);
    assert!(passed.final_exam_passed);
    assert!(!progress.is_final_exam_eligible());

    let feed = app.notifications().snapshot();
    assert_eq!(feed.len(), 4);

    // Graduation: the certificate embeds the name, blank names never render.
    let certificate = app.certificates().render("Dewi Sartika").unwrap();
    assert!(certificate.svg().contains("DEWI SARTIKA"));
    assert!(app.certificates().render("   ").is_err());
}

#[tokio::test]
async fn failing_a_module_keeps_the_curriculum_gated() {
    let app = AppServices::new_in_memory(fixed_clock());
    let workflow = app.quiz_workflow();
    let progress = app.progress();
    let catalog = app.catalog();
    let first = catalog.lessons()[0].id();

    let mut engine = workflow.start_module_quiz(first).unwrap();
    answer_all(&mut engine, 1);
    let outcome = workflow.submit(&mut engine).unwrap();

    assert_eq!(outcome.score, 50);
    assert!(!outcome.passed);
    assert!(!progress.is_completed(first));
    assert!(!progress.is_unlocked(catalog.lessons()[1].id()));
    assert!(app.notifications().is_empty());

    // Retry the same engine and pass.
    engine.retry().unwrap();
    assert!(!engine.can_submit());
    answer_all(&mut engine, 0);
    let outcome = workflow.submit(&mut engine).unwrap();
    assert_eq!(outcome.score, 100);
    assert!(progress.is_unlocked(catalog.lessons()[1].id()));
}
