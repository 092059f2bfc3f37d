mod course_card_vm;
mod filter_vm;
mod lesson_vm;
mod notice;
mod time_fmt;
mod user_vm;

pub use course_card_vm::{CourseCardVm, level_label, map_course_cards, round_percent};
pub use filter_vm::{
    ALL_VALUE, FilterBarVm, FilterOption, category_filter_from_value, category_label,
    level_filter_from_value,
};
pub use lesson_vm::{CourseDetailVm, LessonItemVm};
pub use notice::{Notice, NoticeKind};
pub use user_vm::{UserRowVm, map_user_rows, role_label};
