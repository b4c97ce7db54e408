use crate::models::Note;
use crate::query::QueryView;

/// Main content area of the notes page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NotesBody {
    Loading,
    Error(String),
    Empty,
    List(Vec<Note>),
}

pub(crate) const ERROR_MESSAGE: &str = "Error loading notes";

impl QueryView {
    pub fn body(&self) -> NotesBody {
        if self.is_loading {
            return NotesBody::Loading;
        }
        if self.is_error {
            return NotesBody::Error(
                self.error
                    .as_deref()
                    .map(|e| format!("{ERROR_MESSAGE}: {e}"))
                    .unwrap_or_else(|| ERROR_MESSAGE.to_string()),
            );
        }
        match self.data.as_ref() {
            Some(page) if !page.notes.is_empty() => NotesBody::List(page.notes.clone()),
            _ => NotesBody::Empty,
        }
    }

    pub fn total_pages(&self) -> u32 {
        self.data.as_ref().map(|p| p.total_pages).unwrap_or(0)
    }

    pub fn show_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    /// A request is running behind content that is already on screen.
    pub fn is_refreshing(&self) -> bool {
        self.is_fetching && !self.is_loading
    }

    /// Classes for the content area; results kept from the previous key are
    /// dimmed until the new key's data arrives.
    pub fn content_class(&self) -> &'static str {
        if self.is_placeholder {
            "opacity-60 transition-opacity"
        } else {
            "transition-opacity"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoteTag, NotesPage};

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("title {id}"),
            content: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
            tag: NoteTag::Personal,
        }
    }

    fn loaded(notes: Vec<Note>, total_pages: u32) -> QueryView {
        QueryView {
            data: Some(NotesPage { notes, total_pages }),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_result_shows_empty_state_without_pagination() {
        let view = loaded(vec![], 0);
        assert_eq!(view.body(), NotesBody::Empty);
        assert!(!view.show_pagination());
        assert!(!view.is_loading);
    }

    #[test]
    fn test_loading_without_placeholder() {
        let view = QueryView {
            is_loading: true,
            ..Default::default()
        };
        assert_eq!(view.body(), NotesBody::Loading);
        assert!(!view.show_pagination());
    }

    #[test]
    fn test_error_is_shown_inline() {
        let view = QueryView {
            is_error: true,
            error: Some("offline".to_string()),
            ..Default::default()
        };
        assert_eq!(
            view.body(),
            NotesBody::Error("Error loading notes: offline".to_string())
        );
    }

    #[test]
    fn test_list_and_pagination_thresholds() {
        let single = loaded(vec![note("a")], 1);
        assert_eq!(single.body(), NotesBody::List(vec![note("a")]));
        assert!(!single.show_pagination());

        let many = loaded(vec![note("a"), note("b")], 2);
        assert!(many.show_pagination());
        assert_eq!(many.total_pages(), 2);
    }

    #[test]
    fn test_page_beyond_total_renders_empty_and_keeps_pagination() {
        let view = loaded(vec![], 3);
        assert_eq!(view.body(), NotesBody::Empty);
        assert!(view.show_pagination());
    }

    #[test]
    fn test_placeholder_content_is_dimmed_and_refreshing() {
        let view = QueryView {
            is_placeholder: true,
            is_fetching: true,
            ..loaded(vec![note("a")], 2)
        };
        assert_eq!(view.body(), NotesBody::List(vec![note("a")]));
        assert!(view.is_refreshing());
        assert_eq!(view.content_class(), "opacity-60 transition-opacity");

        let settled = loaded(vec![note("a")], 2);
        assert!(!settled.is_refreshing());
        assert_eq!(settled.content_class(), "transition-opacity");
    }

    #[test]
    fn test_first_load_is_not_refreshing() {
        let view = QueryView {
            is_loading: true,
            is_fetching: true,
            ..Default::default()
        };
        assert!(!view.is_refreshing());
    }
}
