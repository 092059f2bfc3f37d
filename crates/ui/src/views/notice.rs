use std::time::Duration;

use dioxus::prelude::*;

use crate::vm::Notice;

const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Show `value` and clear it after a few seconds unless a newer notice replaced it.
pub fn flash_notice(mut notice: Signal<Option<Notice>>, value: Notice) {
    notice.set(Some(value.clone()));
    spawn(async move {
        tokio::time::sleep(NOTICE_TTL).await;
        if notice.read().as_ref() == Some(&value) {
            notice.set(None);
        }
    });
}

/// Dismissible banner for the latest write result.
#[component]
pub fn NoticeBanner(notice: Signal<Option<Notice>>) -> Element {
    let mut notice = notice;
    let Some(current) = notice() else {
        return rsx! {};
    };
    rsx! {
        div { class: current.class(), role: "status",
            span { "{current.message}" }
            button {
                class: "notice-dismiss",
                r#type: "button",
                onclick: move |_| notice.set(None),
                "Dismiss"
            }
        }
    }
}
