use services::QuizEngine;

use super::test_harness::{ViewKind, setup_view_harness};

fn pass_module_quiz(harness: &super::test_harness::ViewHarness, lesson_index: usize) {
    let catalog = harness.services.catalog();
    let lesson_id = catalog.lessons()[lesson_index].id();
    let workflow = harness.services.quiz_workflow();

    let mut engine = workflow.start_module_quiz(lesson_id).expect("start quiz");
    answer_all_correct(&mut engine);
    workflow.submit(&mut engine).expect("submit quiz");
}

fn answer_all_correct(engine: &mut QuizEngine) {
    loop {
        let question = engine.current_question().clone();
        engine
            .select_option(question.id(), question.correct())
            .expect("select option");
        if engine.can_advance() {
            engine.advance();
        } else {
            break;
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_cards_with_lock_states() {
    let mut harness = setup_view_harness(ViewKind::Dashboard);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Hydroponics Fundamentals"), "missing first lesson in {html}");
    assert!(html.contains("Locked"), "missing locked badge in {html}");
    assert!(html.contains("Start the curriculum"), "missing hero action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lessons_smoke_shows_achievement_counts() {
    let mut harness = setup_view_harness(ViewKind::Lessons);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("You have completed 0 of 4 modules."),
        "missing achievement line in {html}"
    );

    pass_module_quiz(&harness, 0);
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("You have completed 1 of 4 modules."),
        "missing updated achievement line in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_detail_smoke_renders_body_and_quiz_action() {
    let mut harness = setup_view_harness(ViewKind::LessonDetail(1));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Hydroponics Fundamentals"), "missing title in {html}");
    assert!(html.contains("Start the module quiz"), "missing quiz action in {html}");
    assert!(html.contains("farming without soil"), "missing rendered body in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn locked_lesson_detail_smoke_shows_the_gate() {
    let mut harness = setup_view_harness(ViewKind::LessonDetail(3));
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Finish the previous module to unlock this lesson."),
        "missing gate message in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn monitor_smoke_renders_stat_tiles() {
    let mut harness = setup_view_harness(ViewKind::Monitor);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("pH level"), "missing ph tile in {html}");
    assert!(html.contains("2.1 L/m"), "missing flow tile in {html}");
    assert!(html.contains("polyline"), "missing chart in {html}");
}
