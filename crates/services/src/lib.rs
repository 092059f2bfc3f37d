#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod course_service;
pub mod error;
pub mod profile_service;
pub mod progress_service;
pub mod session;
pub mod user_admin_service;

pub use academy_core::Clock;

pub use app_services::AppServices;
pub use catalog_service::{CatalogEntry, CatalogService, Dashboard};
pub use course_service::CourseService;
pub use error::{
    AppServicesError, CatalogError, CourseServiceError, ProfileServiceError, ProgressError,
    UserAdminError,
};
pub use profile_service::ProfileService;
pub use progress_service::{CoursePage, ProgressService};
pub use session::{SessionProvider, StaticSessionProvider, StoredSessionProvider};
pub use user_admin_service::{UserAdminService, UserSummary};
