use std::path::Path;

use serde::{Deserialize, Serialize};

use llwc_core::Column;

use crate::comparator::SortOrder;
use crate::error::EngineError;

/// Table defaults for the list and search views.
///
/// ```toml
/// rows_per_page = 50
/// rows_per_page_options = [25, 50, 100]
///
/// [list_sort]
/// column = "vintage"
/// direction = "desc"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub rows_per_page: usize,
    pub rows_per_page_options: Vec<usize>,
    pub list_sort: SortOrder,
    pub search_sort: SortOrder,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 100,
            rows_per_page_options: vec![25, 50, 100],
            list_sort: SortOrder::asc(Column::TagTexts),
            search_sort: SortOrder::asc(Column::Position),
        }
    }
}

impl ViewConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        let config: ViewConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to the defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), EngineError> {
        if self.rows_per_page == 0 {
            return Err(EngineError::InvalidConfig("rows_per_page must be positive".into()));
        }
        if self.rows_per_page_options.contains(&0) {
            return Err(EngineError::InvalidConfig(
                "rows_per_page_options must be positive".into(),
            ));
        }
        Ok(())
    }
}
