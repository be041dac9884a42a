use crate::libs::error::{Field, ValidationError};
use serde::{Deserialize, Serialize};

pub use crate::libs::interval::CATEGORY_MAX_CHARS;

/// A named category intervals can be filed under.
///
/// Names are unique case-insensitively; the storage layer enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
}

impl CategoryRecord {
    pub fn new(name: &str) -> Self {
        CategoryRecord {
            id: None,
            name: name.trim().to_string(),
        }
    }

    /// Key used for case-insensitive comparison of names.
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn validate(category: CategoryRecord) -> Result<CategoryRecord, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let actual = category.name.chars().count();
    if category.name.trim().is_empty() {
        errors.push(ValidationError::Empty { field: Field::Category });
    }
    if actual > CATEGORY_MAX_CHARS {
        errors.push(ValidationError::TooLong {
            field: Field::Category,
            max: CATEGORY_MAX_CHARS,
            actual,
        });
    }
    if errors.is_empty() {
        Ok(category)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_compares_case_insensitively() {
        let a = CategoryRecord::new("  Deep Work ");
        assert_eq!(a.name, "Deep Work");
        assert_eq!(a.name_key(), name_key("DEEP work"));
    }

    #[test]
    fn rejects_empty_and_long_names() {
        assert_eq!(
            validate(CategoryRecord::new("   ")).unwrap_err(),
            vec![ValidationError::Empty { field: Field::Category }]
        );
        let long = CategoryRecord::new(&"a".repeat(41));
        assert!(matches!(validate(long).unwrap_err()[0], ValidationError::TooLong { max: 40, actual: 41, .. }));
    }
}
