use serde::Serialize;

/// Folder tag for files shared through broadcasts.
pub const BROADCAST_FOLDER: &str = "broadcasts";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessType {
    Owner,
    Read,
}

/// Metadata record describing a shared storage object.
#[derive(Debug, Clone, Serialize)]
pub struct MediaFileRecord<'a> {
    pub file_id: &'a str,
    pub name: &'a str,
    pub mime_type: &'a str,
    pub size: u64,
    pub uploaded_by: Option<&'a str>,
    pub broadcast_id: &'a str,
    pub folder: &'a str,
    pub created_at: i64,
}

/// Per-recipient grant on a media file record.
///
/// Recipients get `Read`, so the file shows up as shared rather than owned.
#[derive(Debug, Clone, Serialize)]
pub struct FileAccessRecord<'a> {
    pub file_id: &'a str,
    pub user_id: &'a str,
    pub access_type: AccessType,
    pub granted_by: Option<&'a str>,
    pub granted_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_access_record_shape() {
        let record = FileAccessRecord {
            file_id: "m1",
            user_id: "u1",
            access_type: AccessType::Read,
            granted_by: None,
            granted_at: 5,
        };
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({
                "file_id": "m1",
                "user_id": "u1",
                "access_type": "read",
                "granted_by": null,
                "granted_at": 5
            })
        );
    }
}
