use serde::Serialize;
use serde_json::Value;

/// A list-documents query, serialised to the JSON form the platform expects
/// in repeated `queries[]` parameters.
#[derive(Debug, Clone, Serialize)]
pub struct Query {
    method: &'static str,
    values: Vec<Value>,
}

impl Query {
    pub fn limit(limit: u32) -> Self {
        Self {
            method: "limit",
            values: vec![limit.into()],
        }
    }

    pub fn offset(offset: u64) -> Self {
        Self {
            method: "offset",
            values: vec![offset.into()],
        }
    }

    pub fn to_param(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Encode queries as `queries[]` pairs for `RequestBuilder::query`.
pub fn as_params(queries: &[Query]) -> serde_json::Result<Vec<(&'static str, String)>> {
    queries
        .iter()
        .map(|q| Ok(("queries[]", q.to_param()?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_and_offset_encoding() {
        assert_eq!(Query::limit(100).to_param().unwrap(), r#"{"method":"limit","values":[100]}"#);
        assert_eq!(Query::offset(200).to_param().unwrap(), r#"{"method":"offset","values":[200]}"#);
    }

    #[test]
    fn test_as_params_repeats_key() {
        let params = as_params(&[Query::limit(10), Query::offset(0)]).unwrap();
        assert_eq!(params.len(), 2);
        assert!(params.iter().all(|(k, _)| *k == "queries[]"));
    }
}
