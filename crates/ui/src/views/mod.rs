mod access_denied;
mod course;
mod dashboard;
mod new_course;
mod notice;
mod profile;
mod sign_in;
mod state;
mod users;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use access_denied::AccessDenied;
pub use course::CourseView;
pub use dashboard::DashboardView;
pub use new_course::NewCourseView;
pub use notice::{NoticeBanner, flash_notice};
pub use profile::ProfileView;
pub use sign_in::SignInView;
pub use state::{ViewError, ViewState, view_state_from_resource};
pub use users::UsersView;
