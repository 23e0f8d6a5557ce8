use serde::Deserialize;

/// Profile document from the users collection.
///
/// `id` is the account identifier used for permissions and push targets,
/// distinct from the document's own `$id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

impl UserDocument {
    /// Account id, or `None` when missing or blank.
    pub fn account_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// True when any of the user's labels (lowercased) is in `wanted`,
    /// which must already be lowercased.
    pub fn has_any_label(&self, wanted: &[String]) -> bool {
        self.labels.iter().flatten().any(|label| {
            let label = label.trim().to_lowercase();
            wanted.iter().any(|w| *w == label)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_id_skips_blank() {
        let user: UserDocument = serde_json::from_value(json!({ "id": "  " })).unwrap();
        assert_eq!(user.account_id(), None);

        let user: UserDocument = serde_json::from_value(json!({ "$id": "doc1" })).unwrap();
        assert_eq!(user.account_id(), None);

        let user: UserDocument = serde_json::from_value(json!({ "id": "u1" })).unwrap();
        assert_eq!(user.account_id(), Some("u1"));
    }

    #[test]
    fn test_label_match_is_case_insensitive() {
        let user: UserDocument =
            serde_json::from_value(json!({ "id": "u1", "labels": ["Admin", "staff"] })).unwrap();
        assert!(user.has_any_label(&["admin".to_string()]));
        assert!(!user.has_any_label(&["parents".to_string()]));
    }

    #[test]
    fn test_null_labels_never_match() {
        let user: UserDocument =
            serde_json::from_value(json!({ "id": "u1", "labels": null })).unwrap();
        assert!(!user.has_any_label(&["admin".to_string()]));
    }
}
