// Accessibility helpers

/// Id of the polite live region rendered by the app shell.
pub const STATUS_REGION_ID: &str = "passport-status";

/// Focus ring and screen-reader utility classes, injected by the app shell.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus-visible{outline:3px solid #c5a059;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;}"
}

/// Announce `msg` through the live region, if it is mounted.
pub fn set_status(msg: &str) {
    if let Some(node) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID))
    {
        node.set_text_content(Some(msg));
    }
}

/// Screen-reader summary of a finished attempt.
#[must_use]
pub fn result_announcement(title: &str, won: bool) -> String {
    if won {
        format!("{title}: mission accomplished, winner stamp earned")
    } else {
        format!("{title}: participation stamp earned, try again for the win")
    }
}
