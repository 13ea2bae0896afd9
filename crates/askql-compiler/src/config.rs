use askql_core::QueryFeatures;
use serde::{Deserialize, Serialize};

/// When stored concepts may be recomputed instead of read from the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConceptCaching {
    /// Always recompute.
    None,
    /// Recompute only concepts within the feature/size/depth limits.
    #[default]
    Hard,
    /// Never recompute a cached concept.
    All,
}

/// Tunables of one compilation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub(crate) subcategory_depth: u32,
    pub(crate) subproperty_depth: u32,
    pub(crate) concept_caching: ConceptCaching,
    pub(crate) concept_cache_lifetime_minutes: i64,
    pub(crate) concept_features: QueryFeatures,
    pub(crate) concept_max_size: u32,
    pub(crate) concept_max_depth: u32,
    pub(crate) max_concept_nesting: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            subcategory_depth: 10,
            subproperty_depth: 10,
            concept_caching: ConceptCaching::Hard,
            concept_cache_lifetime_minutes: 24 * 60,
            concept_features: QueryFeatures::ALL,
            concept_max_size: 20,
            concept_max_depth: 8,
            max_concept_nesting: 16,
        }
    }
}

impl CompilerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn subcategory_depth(mut self, depth: u32) -> Self {
        self.subcategory_depth = depth;
        self
    }

    pub fn subproperty_depth(mut self, depth: u32) -> Self {
        self.subproperty_depth = depth;
        self
    }

    pub fn concept_caching(mut self, caching: ConceptCaching) -> Self {
        self.concept_caching = caching;
        self
    }

    pub fn concept_cache_lifetime_minutes(mut self, minutes: i64) -> Self {
        self.concept_cache_lifetime_minutes = minutes;
        self
    }

    pub fn concept_features(mut self, features: QueryFeatures) -> Self {
        self.concept_features = features;
        self
    }

    pub fn concept_max_size(mut self, size: u32) -> Self {
        self.concept_max_size = size;
        self
    }

    pub fn concept_max_depth(mut self, depth: u32) -> Self {
        self.concept_max_depth = depth;
        self
    }

    pub fn max_concept_nesting(mut self, nesting: usize) -> Self {
        self.max_concept_nesting = nesting;
        self
    }
}
