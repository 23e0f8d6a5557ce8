use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub platform_endpoint: String,
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub broadcasts_collection_id: String,
    pub users_collection_id: String,
    // Video attachment (optional, all three must be set)
    pub media_files_collection_id: Option<String>,
    pub file_access_collection_id: Option<String>,
    pub media_files_bucket_id: Option<String>,
    pub admin_team_id: String,
    pub admin_user_id: Option<String>,
    pub file_access_concurrency: usize,
    pub platform_timeout_secs: u64,
    pub function_key: Option<String>,
    pub host: String,
    pub port: u16,
}

/// Collection and bucket identifiers used by the video attachment sub-flow.
#[derive(Debug, Clone, Copy)]
pub struct MediaTargets<'a> {
    pub media_files_collection_id: &'a str,
    pub file_access_collection_id: &'a str,
    pub bucket_id: &'a str,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow::anyhow!("Missing required env var: {}", key))
        };

        Ok(Self {
            platform_endpoint: get("APPWRITE_ENDPOINT")
                .unwrap_or_else(|| "https://cloud.appwrite.io/v1".into())
                .trim_end_matches('/')
                .to_string(),
            project_id: required("APPWRITE_PROJECT_ID")?,
            api_key: required("APPWRITE_API_KEY")?,
            database_id: required("DATABASE_ID")?,
            broadcasts_collection_id: required("BROADCASTS_COLLECTION_ID")?,
            users_collection_id: required("USERS_COLLECTION_ID")?,
            media_files_collection_id: get("MEDIA_FILES_COLLECTION_ID"),
            file_access_collection_id: get("FILE_ACCESS_COLLECTION_ID"),
            media_files_bucket_id: get("MEDIA_FILES_BUCKET_ID"),
            admin_team_id: get("ADMIN_TEAM_ID").unwrap_or_else(|| "admin".into()),
            admin_user_id: get("ADMIN_USER_ID"),
            file_access_concurrency: get("FILE_ACCESS_CONCURRENCY")
                .unwrap_or_else(|| "4".into())
                .parse::<usize>()?
                .max(1),
            platform_timeout_secs: get("PLATFORM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".into())
                .parse()?,
            function_key: get("BROADCAST_FUNCTION_KEY"),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: get("PORT").unwrap_or_else(|| "3000".into()).parse()?,
        })
    }

    /// Returns the media identifiers only when all three are configured.
    pub fn media_targets(&self) -> Option<MediaTargets<'_>> {
        Some(MediaTargets {
            media_files_collection_id: self.media_files_collection_id.as_deref()?,
            file_access_collection_id: self.file_access_collection_id.as_deref()?,
            bucket_id: self.media_files_bucket_id.as_deref()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("APPWRITE_PROJECT_ID", "proj"),
            ("APPWRITE_API_KEY", "secret"),
            ("DATABASE_ID", "main"),
            ("BROADCASTS_COLLECTION_ID", "broadcasts"),
            ("USERS_COLLECTION_ID", "users"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> anyhow::Result<Config> {
        Config::from_lookup(|k| vars.get(k).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults_applied() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.platform_endpoint, "https://cloud.appwrite.io/v1");
        assert_eq!(config.admin_team_id, "admin");
        assert_eq!(config.file_access_concurrency, 4);
        assert_eq!(config.port, 3000);
        assert!(config.admin_user_id.is_none());
        assert!(config.media_targets().is_none());
    }

    #[test]
    fn test_missing_required_fails() {
        for key in ["DATABASE_ID", "BROADCASTS_COLLECTION_ID", "USERS_COLLECTION_ID"] {
            let mut vars = base_env();
            vars.remove(key);
            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = base_env();
        vars.insert("DATABASE_ID", "  ");
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_media_targets_need_all_three() {
        let mut vars = base_env();
        vars.insert("MEDIA_FILES_COLLECTION_ID", "media");
        vars.insert("FILE_ACCESS_COLLECTION_ID", "access");
        assert!(load(&vars).unwrap().media_targets().is_none());

        vars.insert("MEDIA_FILES_BUCKET_ID", "videos");
        let config = load(&vars).unwrap();
        let targets = config.media_targets().unwrap();
        assert_eq!(targets.bucket_id, "videos");
        assert_eq!(targets.media_files_collection_id, "media");
    }

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let mut vars = base_env();
        vars.insert("APPWRITE_ENDPOINT", "http://localhost/v1/");
        assert_eq!(load(&vars).unwrap().platform_endpoint, "http://localhost/v1");
    }
}
