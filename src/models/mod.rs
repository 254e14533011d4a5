use serde::{Deserialize, Serialize};

/// The backend has been observed returning ids as both JSON numbers and
/// strings; normalize either form to `String` on the way in.
pub(crate) mod flexible_id {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(id: &str, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(id)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        match serde_json::Value::deserialize(de)? {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            other => Err(serde::de::Error::custom(format!(
                "unsupported id value: {other}"
            ))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct User {
    #[serde(with = "flexible_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Note {
    #[serde(with = "flexible_id")]
    pub id: String,
    pub title: String,
    pub content: String,

    /// Assignment list. The backend writes an explicit `null` entry for an
    /// unassigned note, so entries are optional rather than the list itself.
    #[serde(default)]
    pub shared_with: Vec<Option<User>>,
}

impl Note {
    /// First assigned user, if any. Only the first entry is ever shown.
    pub fn assignee(&self) -> Option<&User> {
        self.shared_with.first().and_then(|u| u.as_ref())
    }

    pub fn assignee_label(&self) -> String {
        self.assignee()
            .map(User::full_name)
            .unwrap_or_else(|| "Not Assigned".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, first: &str, last: &str) -> User {
        User {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_note_parses_numeric_and_string_ids() {
        let n: Note = serde_json::from_str(r#"{"id": 7, "title": "a", "content": "b"}"#)
            .expect("numeric id should parse");
        assert_eq!(n.id, "7");

        let n: Note = serde_json::from_str(r#"{"id": "7", "title": "a", "content": "b"}"#)
            .expect("string id should parse");
        assert_eq!(n.id, "7");
    }

    #[test]
    fn test_note_parses_missing_shared_with() {
        let n: Note = serde_json::from_str(r#"{"id": 1, "title": "a", "content": "b"}"#)
            .expect("shared_with should default");
        assert!(n.shared_with.is_empty());
        assert_eq!(n.assignee_label(), "Not Assigned");
    }

    #[test]
    fn test_note_parses_null_assignment_entry() {
        let json = r#"{"id": 1, "title": "a", "content": "b", "shared_with": [null]}"#;
        let n: Note = serde_json::from_str(json).expect("null entry should parse");
        assert_eq!(n.shared_with.len(), 1);
        assert!(n.assignee().is_none());
        assert_eq!(n.assignee_label(), "Not Assigned");
    }

    #[test]
    fn test_note_parses_assigned_user() {
        let json = r#"{
            "id": 1,
            "title": "a",
            "content": "b",
            "shared_with": [{"id": 3, "first_name": "Sara", "last_name": "Amrani"}]
        }"#;
        let n: Note = serde_json::from_str(json).expect("assigned note should parse");
        assert_eq!(n.assignee().map(|u| u.id.as_str()), Some("3"));
        assert_eq!(n.assignee_label(), "Sara Amrani");
    }

    #[test]
    fn test_assignee_label_uses_only_first_entry() {
        let n = Note {
            id: "1".to_string(),
            title: "a".to_string(),
            content: "b".to_string(),
            shared_with: vec![
                Some(user("3", "Sara", "Amrani")),
                Some(user("4", "Omar", "Idrissi")),
            ],
        };
        assert_eq!(n.assignee_label(), "Sara Amrani");
    }

    #[test]
    fn test_leading_null_entry_hides_later_users() {
        // Matches the rendering contract: only shared_with[0] is consulted.
        let n = Note {
            id: "1".to_string(),
            title: "a".to_string(),
            content: "b".to_string(),
            shared_with: vec![None, Some(user("4", "Omar", "Idrissi"))],
        };
        assert_eq!(n.assignee_label(), "Not Assigned");
    }

    #[test]
    fn test_user_full_name() {
        assert_eq!(user("1", "Sara", "Amrani").full_name(), "Sara Amrani");
    }
}
