use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};

use hydro_core::LessonCatalog;
use hydro_core::model::ThemePreference;
use hydro_core::time::fixed_clock;
use services::{
    AppServices, AppSettingsService, CertificateService, NotificationFeed, ProgressService,
    QuizWorkflowService, SensorFeedService, TutorService,
};

use crate::app::{ProgressTick, ThemeSignal};
use crate::context::{UiApp, build_app_context};
use crate::views::{DashboardView, LessonDetailView, LessonsView, MonitorView};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<LessonCatalog> {
        self.services.catalog()
    }

    fn notifications(&self) -> Arc<NotificationFeed> {
        self.services.notifications()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn quiz_workflow(&self) -> Arc<QuizWorkflowService> {
        self.services.quiz_workflow()
    }

    fn settings(&self) -> Arc<AppSettingsService> {
        self.services.settings()
    }

    fn tutor(&self) -> Arc<TutorService> {
        self.services.tutor()
    }

    fn certificates(&self) -> Arc<CertificateService> {
        self.services.certificates()
    }

    fn sensors(&self) -> Arc<SensorFeedService> {
        self.services.sensors()
    }

    fn initial_theme(&self) -> ThemePreference {
        ThemePreference::Light
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Lessons,
    LessonDetail(u64),
    Monitor,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| ThemeSignal(Signal::new(ThemePreference::Light)));
    use_context_provider(|| ProgressTick(Signal::new(0)));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Lessons => rsx! { LessonsView {} },
        ViewKind::LessonDetail(lesson_id) => rsx! { LessonDetailView { lesson_id } },
        ViewKind::Monitor => rsx! { MonitorView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let services = AppServices::new_in_memory(fixed_clock());
    let app = Arc::new(TestApp {
        services: services.clone(),
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
