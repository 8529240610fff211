use serde::{Deserialize, Serialize};

/// Whether a field may be left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlankPolicy {
    Required,
    Optional,
}

/// Column definition for one register field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Field number in the filing instructions guide (1-based).
    pub number: u16,
    pub title: String,
    pub blank: BlankPolicy,
    /// Fixed set of codes, for enumerated fields.
    pub codes: Option<Vec<String>>,
    /// Whether the field holds `;`-separated values.
    pub multi_value: bool,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, number: u16, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            number,
            title: title.into(),
            blank: BlankPolicy::Required,
            codes: None,
            multi_value: false,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.blank = BlankPolicy::Optional;
        self
    }

    #[must_use]
    pub fn with_codes(mut self, codes: &[&str]) -> Self {
        self.codes = Some(codes.iter().map(|code| (*code).to_string()).collect());
        self
    }

    #[must_use]
    pub fn multi_value(mut self) -> Self {
        self.multi_value = true;
        self
    }

    /// "Field N: title", as cited in the filing instructions guide.
    pub fn display_title(&self) -> String {
        format!("Field {}: {}", self.number, self.title)
    }

    pub fn accepts_blank(&self) -> bool {
        self.blank == BlankPolicy::Optional
    }
}
