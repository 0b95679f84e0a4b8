use yew::prelude::*;

pub const SITE_NAME: &str = "FilmHub";

/// Sets the document title to "<page> | FilmHub". No cleanup on unmount
/// since each page sets its own title, and unmount/mount ordering isn't
/// guaranteed during route transitions.
#[hook]
pub fn use_title(page: &str) {
    let title = page_title(page);
    use_effect_with(title, |title| {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(title);
        }
    });
}

pub fn page_title(page: &str) -> String {
    format!("{page} | {SITE_NAME}")
}

#[cfg(test)]
mod tests {
    #[test]
    fn page_title_carries_site_name() {
        assert_eq!(super::page_title("Admin"), "Admin | FilmHub");
    }
}
