use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use academy_core::model::{CourseId, LessonId, Profile, Role, UserId, UserSession};
use academy_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{
    AppServices, CatalogService, Clock, CourseService, ProfileService, ProgressService,
    SessionProvider, UserAdminService,
};
use storage::repository::{ProfileRepository, RoleRepository, Storage};

use crate::context::{CurrentSession, UiApp, build_app_context};
use crate::views::{CourseView, DashboardView, NewCourseView, ProfileView, UsersView};

use super::course::{render_course, use_complete_lesson, use_course_state};
use super::users::{render_users, use_role_change, use_users_state};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn session_provider(&self) -> Arc<dyn SessionProvider> {
        self.services.session()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn courses(&self) -> Arc<CourseService> {
        self.services.courses()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn profiles(&self) -> Arc<ProfileService> {
        self.services.profiles()
    }

    fn user_admin(&self) -> Arc<UserAdminService> {
        self.services.user_admin()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Course(u64),
    NewCourse,
    Users,
    Profile,
    /// Course view whose completion action is exposed through `ActionHandles`.
    CourseActions(u64),
    /// Users view whose role action is exposed through `ActionHandles`.
    UsersActions,
}

/// Callbacks captured from rendered views so tests can trigger their actions.
#[derive(Clone, Default)]
pub struct ActionHandles {
    complete_lesson: Rc<RefCell<Option<Callback<LessonId>>>>,
    change_role: Rc<RefCell<Option<Callback<(UserId, Role)>>>>,
}

impl ActionHandles {
    pub fn complete_lesson(&self) -> Callback<LessonId> {
        (*self.complete_lesson.borrow()).expect("course view rendered")
    }

    pub fn change_role(&self) -> Callback<(UserId, Role)> {
        (*self.change_role.borrow()).expect("users view rendered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    session: Option<UserSession>,
    handles: ActionHandles,
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
    use_context_provider(|| CurrentSession::new(props.session));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
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
        ViewKind::Course(course_id) => rsx! { CourseView { course_id } },
        ViewKind::NewCourse => rsx! { NewCourseView {} },
        ViewKind::Users => rsx! { UsersView {} },
        ViewKind::Profile => rsx! { ProfileView {} },
        ViewKind::CourseActions(course_id) => rsx! { CourseWithHandles { course_id } },
        ViewKind::UsersActions => rsx! { UsersWithHandles {} },
    }
}

#[component]
fn CourseWithHandles(course_id: u64) -> Element {
    let handles = use_context::<ActionHandles>();
    let state = use_course_state(CourseId::new(course_id));
    let on_complete = use_complete_lesson(state);
    *handles.complete_lesson.borrow_mut() = Some(on_complete);
    render_course(state, on_complete)
}

#[component]
fn UsersWithHandles() -> Element {
    let handles = use_context::<ActionHandles>();
    let state = use_users_state();
    let on_role_change = use_role_change(state);
    *handles.change_role.borrow_mut() = Some(on_role_change);
    render_users(state, on_role_change)
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub user_id: UserId,
    pub handles: ActionHandles,
}

impl ViewHarness {
    /// Invoke a captured callback inside the dom's runtime.
    pub fn call<T: 'static>(&mut self, callback: Callback<T>, value: T) {
        self.dom.in_runtime(|| callback.call(value));
        drive_dom(&mut self.dom);
    }

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

    /// Rebuild and let resources and effects finish.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.flush().await;
    }

    /// Let spawned tasks, restarted resources and effects finish.
    pub async fn flush(&mut self) {
        for _ in 0..4 {
            self.drive_async().await;
        }
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

/// Harness over fresh in-memory storage with one signed-in user holding `role`.
pub async fn setup_view_harness(view: ViewKind, role: Option<Role>) -> ViewHarness {
    setup_view_harness_with_storage(view, role, Storage::in_memory()).await
}

/// `role = None` renders the view signed out.
pub async fn setup_view_harness_with_storage(
    view: ViewKind,
    role: Option<Role>,
    storage: Storage,
) -> ViewHarness {
    let user_id = UserId::random();
    let session = role.map(|role| UserSession::new(user_id, role));

    if let Some(session) = session {
        storage
            .profiles
            .upsert_profile(&Profile::new(user_id, Some("Test User".into()), fixed_now()))
            .await
            .expect("seed profile");
        storage
            .roles
            .set_role(user_id, session.role)
            .await
            .expect("seed role");
    }

    // Sessions resolve from storage, as in the desktop app.
    let services = AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        session.map(|s| s.user_id),
    );
    let app = Arc::new(TestApp { services });
    let handles = ActionHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            session,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        user_id,
        handles,
    }
}
