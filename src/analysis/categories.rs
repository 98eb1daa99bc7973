//! Program identifier → category label table
//!
//! Built from configuration so new programs can be labelled without touching
//! the sampler or the aggregator.

use crate::config::CategoryConfig;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ProgramCategories {
    labels: HashMap<String, String>,
    default_label: String,
}

impl ProgramCategories {
    pub fn new<I, K, V>(labels: I, default_label: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            labels: labels
                .into_iter()
                .map(|(program_id, label)| (program_id.into(), label.into()))
                .collect(),
            default_label: default_label.into(),
        }
    }

    pub fn from_config(config: &CategoryConfig) -> Self {
        Self::new(
            config
                .labels
                .iter()
                .map(|entry| (entry.program_id.clone(), entry.label.clone())),
            config.default_label.clone(),
        )
    }

    /// Exact-match lookup, falling back to the default label
    pub fn label_for(&self, program_id: &str) -> &str {
        self.labels
            .get(program_id)
            .map(String::as_str)
            .unwrap_or(&self.default_label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for ProgramCategories {
    fn default() -> Self {
        Self::from_config(&CategoryConfig::default())
    }
}
