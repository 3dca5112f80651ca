use serde::{Deserialize, Serialize};

/// One meme layout offered by a provider, reduced to a provider-neutral
/// shape. Imgflip fills `box_count` and leaves `keywords`/`styles` empty;
/// Memegen does the opposite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Unique within one catalog snapshot. Names are not.
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blank_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box_count: Option<u32>,
}

impl Template {
    /// True when the case-folded name, id, or any keyword contains `term`
    /// as a substring. `term` must already be lowercase.
    pub(crate) fn matches_term(&self, term: &str) -> bool {
        self.name.to_lowercase().contains(term)
            || self.id.to_lowercase().contains(term)
            || self
                .keywords
                .iter()
                .any(|keyword| keyword.to_lowercase().contains(term))
    }
}
