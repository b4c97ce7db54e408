use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Note category accepted by the NoteHub backend.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, AsRefStr,
    EnumIter, EnumString,
)]
pub(crate) enum NoteTag {
    #[default]
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    pub tag: NoteTag,
}

/// One page of the notes listing, as returned by `GET /notes`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NewNote {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_notes_page_contract_deserialize() {
        let json = r#"{
            "notes": [{
                "id": "65ca67e7ae7f10c88b598384",
                "title": "Groceries",
                "content": "milk, eggs",
                "createdAt": "2024-02-12T18:46:31.442Z",
                "updatedAt": "2024-02-12T18:46:31.442Z",
                "tag": "Shopping"
            }],
            "totalPages": 4
        }"#;
        let parsed: NotesPage = serde_json::from_str(json).expect("notes page should parse");
        assert_eq!(parsed.total_pages, 4);
        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].tag, NoteTag::Shopping);
        assert_eq!(parsed.notes[0].created_at, "2024-02-12T18:46:31.442Z");
    }

    #[test]
    fn test_note_missing_optional_fields() {
        let json = r#"{"id": "1", "title": "t", "tag": "Work"}"#;
        let parsed: Note = serde_json::from_str(json).expect("note should parse");
        assert!(parsed.content.is_empty());
        assert!(parsed.updated_at.is_empty());
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        let json = r#"{"id": "1", "title": "t", "tag": "Hobby"}"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_new_note_serialization() {
        let req = NewNote {
            title: "Standup".to_string(),
            content: String::new(),
            tag: NoteTag::Meeting,
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["title"], "Standup");
        assert_eq!(v["tag"], "Meeting");
    }

    #[test]
    fn test_tag_strings_match_wire_names() {
        for tag in NoteTag::iter() {
            let wire = serde_json::to_value(tag).expect("should serialize");
            assert_eq!(wire, tag.as_ref());
            assert_eq!(NoteTag::from_str(tag.as_ref()).ok(), Some(tag));
        }
    }
}
