use crate::{
    db::Database,
    error::{ApiError, ApiResult},
    models::{
        broadcast::{CreateBroadcastRequest, TargetType},
        user::UserDocument,
    },
};

/// Normalised targeting directive of a create request.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetDirective {
    All,
    /// Lowercased, trimmed, non-empty labels.
    Labels(Vec<String>),
    /// Trimmed, non-empty account ids in request order.
    Users(Vec<String>),
}

impl TargetDirective {
    pub fn from_request(req: &CreateBroadcastRequest) -> ApiResult<Self> {
        match req.target_type.unwrap_or_default() {
            TargetType::All => Ok(TargetDirective::All),
            TargetType::Users => {
                let ids: Vec<String> = req
                    .target_user_ids
                    .iter()
                    .flatten()
                    .map(|id| id.trim())
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect();
                if ids.is_empty() {
                    return Err(ApiError::validation(
                        "targetUserIds must contain at least one user id when targetType is 'users'",
                    ));
                }
                Ok(TargetDirective::Users(ids))
            }
            TargetType::Labels => {
                let labels: Vec<String> = req
                    .target_labels
                    .iter()
                    .flatten()
                    .map(|l| l.trim().to_lowercase())
                    .filter(|l| !l.is_empty())
                    .collect();
                if labels.is_empty() {
                    return Err(ApiError::validation(
                        "targetLabels must contain at least one label when targetType is 'labels'",
                    ));
                }
                Ok(TargetDirective::Labels(labels))
            }
        }
    }
}

pub struct TargetResolver;

impl TargetResolver {
    /// Turn a directive into recipient account ids, in discovery order.
    ///
    /// `users` mode never touches the database; the other modes walk the
    /// whole users collection.
    pub async fn resolve(
        db: &Database<'_>,
        users_collection_id: &str,
        directive: &TargetDirective,
    ) -> ApiResult<Vec<String>> {
        if let TargetDirective::Users(ids) = directive {
            return Ok(ids.clone());
        }

        let users: Vec<UserDocument> = db.list_all_documents(users_collection_id).await?;
        let targets = Self::select(&users, directive);

        tracing::debug!(
            "Resolved {} target(s) from {} user document(s)",
            targets.len(),
            users.len()
        );
        Ok(targets)
    }

    /// Pick account ids out of fetched user documents. Users without an
    /// account id are skipped.
    pub fn select(users: &[UserDocument], directive: &TargetDirective) -> Vec<String> {
        match directive {
            TargetDirective::Users(ids) => ids.clone(),
            TargetDirective::All => users
                .iter()
                .filter_map(|u| u.account_id())
                .map(String::from)
                .collect(),
            TargetDirective::Labels(labels) => users
                .iter()
                .filter(|u| u.has_any_label(labels))
                .filter_map(|u| u.account_id())
                .map(String::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> Vec<UserDocument> {
        serde_json::from_value(json!([
            { "id": "u1", "labels": ["Admin"] },
            { "id": "", "labels": ["admin"] },
            { "labels": ["staff"] },
            { "id": "u2", "labels": ["staff", "ADMIN"] },
            { "id": "u3" },
        ]))
        .unwrap()
    }

    fn request(value: serde_json::Value) -> CreateBroadcastRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_default_directive_is_all() {
        let directive = TargetDirective::from_request(&request(json!({ "text": "x" }))).unwrap();
        assert_eq!(directive, TargetDirective::All);
    }

    #[test]
    fn test_user_ids_trimmed_in_order() {
        let directive = TargetDirective::from_request(&request(json!({
            "targetType": "users",
            "targetUserIds": [" b ", "", "a", "   ", "b"]
        })))
        .unwrap();
        assert_eq!(
            directive,
            TargetDirective::Users(vec!["b".into(), "a".into(), "b".into()])
        );
    }

    #[test]
    fn test_empty_user_ids_rejected() {
        let err = TargetDirective::from_request(&request(json!({
            "targetType": "users",
            "targetUserIds": ["", " "]
        })))
        .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        let err = TargetDirective::from_request(&request(json!({ "targetType": "users" })))
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_empty_labels_rejected() {
        let err = TargetDirective::from_request(&request(json!({
            "targetType": "labels",
            "targetLabels": []
        })))
        .unwrap_err();
        assert!(err.to_string().contains("targetLabels"));
    }

    #[test]
    fn test_labels_lowercased() {
        let directive = TargetDirective::from_request(&request(json!({
            "targetType": "labels",
            "targetLabels": ["ADMIN", " Staff "]
        })))
        .unwrap();
        assert_eq!(
            directive,
            TargetDirective::Labels(vec!["admin".into(), "staff".into()])
        );
    }

    #[test]
    fn test_select_all_skips_missing_ids() {
        assert_eq!(
            TargetResolver::select(&users(), &TargetDirective::All),
            vec!["u1", "u2", "u3"]
        );
    }

    #[test]
    fn test_select_by_label_intersection() {
        let admins = TargetResolver::select(&users(), &TargetDirective::Labels(vec!["admin".into()]));
        assert_eq!(admins, vec!["u1", "u2"]);

        let nobody =
            TargetResolver::select(&users(), &TargetDirective::Labels(vec!["parents".into()]));
        assert!(nobody.is_empty());
    }
}
