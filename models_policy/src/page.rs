use serde::Deserialize;

/// The page envelope the backend's list endpoints return.
///
/// Only `content` is required; the bookkeeping fields default to zero when
/// a backend omits them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
}

/// A list endpoint response: either the page envelope or a bare array.
///
/// Some endpoints still return a bare array; both shapes are accepted at
/// this single point rather than per call site. The backend contract
/// should converge on the envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paged(PageResponse<T>),
    Bare(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> PageResponse<T> {
        match self {
            Self::Paged(page) => page,
            Self::Bare(content) => {
                let total = content.len() as u64;
                PageResponse {
                    content,
                    total_elements: total,
                    total_pages: u32::from(total > 0),
                    number: 0,
                    size: total as u32,
                }
            }
        }
    }

    pub fn into_content(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.content,
            Self::Bare(content) => content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawRecord;

    #[test]
    fn parses_page_envelope() {
        let raw = r#"{"content":[{"policyNumber":"LP234567"}],"totalElements":1,"totalPages":1,"number":0,"size":5}"#;
        let parsed: ListResponse<RawRecord> = serde_json::from_str(raw).unwrap();
        let page = parsed.into_page();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.content.len(), 1);
    }

    #[test]
    fn parses_bare_array_fallback() {
        let raw = r#"[{"policyNumber":"LP234567"},{"policyNumber":"CC123456"}]"#;
        let parsed: ListResponse<RawRecord> = serde_json::from_str(raw).unwrap();
        let page = parsed.into_page();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_elements, 2);
    }

    #[test]
    fn envelope_without_bookkeeping_fields_defaults() {
        let raw = r#"{"content":[]}"#;
        let parsed: ListResponse<RawRecord> = serde_json::from_str(raw).unwrap();
        let page = parsed.into_page();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
