//! Shared service helpers: JSON body merging and in-memory paging.
//!
//! # Invariants
//! - Read-only keys in a body are ignored, never applied.
//! - Unknown keys are rejected by the record's `deny_unknown_fields`.
//! - Filtered lists are filtered before paging, so pages are stable.

use super::error::{ServiceError, ServiceResult};
use crate::model::lab::LabId;
use crate::model::validation::ValidationError;
use crate::repo::common::{normalize_limit, ListQuery, RepoResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Keys that clients can send but never change.
pub const READ_ONLY_FIELDS: &[&str] = &["id", "created_at", "updated_at", "added_on"];

const FETCH_CHUNK: u32 = 500;

/// Limit/offset window applied to list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    /// Defaults to 100 and clamps to 500.
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    pub fn to_query(self, lab_id: Option<LabId>) -> ListQuery {
        ListQuery {
            lab_id,
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset as usize)
            .take(normalize_limit(self.limit) as usize)
            .collect()
    }
}

/// Overlays the keys of `body` onto `base` and decodes the result.
pub fn merge_json<T>(base: &T, body: Value) -> ServiceResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let Value::Object(patch) = body else {
        return Err(ValidationError::new("body", "expected a JSON object").into());
    };
    let mut merged = serde_json::to_value(base)
        .map_err(|err| ValidationError::new("body", err.to_string()))?;
    if let Value::Object(target) = &mut merged {
        for (key, value) in patch {
            if READ_ONLY_FIELDS.contains(&key.as_str()) {
                continue;
            }
            target.insert(key, value);
        }
    }
    serde_json::from_value(merged)
        .map_err(|err| ServiceError::Validation(ValidationError::new("body", err.to_string())))
}

/// Drains every page of a repository list, optionally scoped to one lab.
pub(crate) fn fetch_all<T>(
    lab_id: Option<LabId>,
    mut fetch: impl FnMut(&ListQuery) -> RepoResult<Vec<T>>,
) -> RepoResult<Vec<T>> {
    let mut items = Vec::new();
    let mut offset = 0u32;
    loop {
        let batch = fetch(&ListQuery {
            lab_id,
            limit: Some(FETCH_CHUNK),
            offset,
        })?;
        let fetched = batch.len();
        items.extend(batch);
        if fetched < FETCH_CHUNK as usize {
            return Ok(items);
        }
        offset = offset.saturating_add(FETCH_CHUNK);
    }
}

#[cfg(test)]
mod tests {
    use super::{fetch_all, merge_json, Page};
    use crate::model::lab::Lab;
    use crate::repo::common::ListQuery;
    use crate::service::error::ServiceError;
    use serde_json::json;

    #[test]
    fn merge_overlays_body_and_keeps_read_only_fields() {
        let mut base = Lab::new("Networks Lab");
        base.id = 7;
        base.created_at = 100;

        let merged = merge_json(&base, json!({"id": 99, "created_at": 1, "fans": 4}))
            .expect("merge should succeed");
        assert_eq!(merged.id, 7);
        assert_eq!(merged.created_at, 100);
        assert_eq!(merged.fans, 4);
        assert_eq!(merged.name, "Networks Lab");
    }

    #[test]
    fn merge_rejects_unknown_fields_and_non_objects() {
        let base = Lab::new("Networks Lab");
        let unknown = merge_json(&base, json!({"colour": "blue"})).unwrap_err();
        assert!(matches!(unknown, ServiceError::Validation(ref err) if err.field == "body"));

        let not_object = merge_json(&base, json!(["name"])).unwrap_err();
        assert!(matches!(not_object, ServiceError::Validation(_)));
    }

    #[test]
    fn fetch_all_walks_every_chunk() {
        let rows: Vec<u32> = (0..1_234).collect();
        let mut calls = 0;
        let all = fetch_all(None, |query: &ListQuery| {
            calls += 1;
            let start = query.offset as usize;
            let end = (start + query.limit.unwrap_or(0) as usize).min(rows.len());
            Ok(rows[start..end].to_vec())
        })
        .expect("fetch should succeed");
        assert_eq!(all.len(), 1_234);
        assert_eq!(calls, 3);
    }

    #[test]
    fn page_applies_offset_and_default_limit() {
        let items: Vec<u32> = (0..250).collect();
        let page = Page {
            limit: None,
            offset: 200,
        };
        assert_eq!(page.apply(items.clone()).len(), 50);
        assert_eq!(Page::default().apply(items).len(), 100);
    }
}
