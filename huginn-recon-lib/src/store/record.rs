use std::fmt;

/// One `label;value` row of a reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    pub label: String,
    pub value: String,
}

impl ReferenceRecord {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }

    /// Parse a stored line
    ///
    /// The first `;` separates label from value, so values may contain `;`.
    /// Trailing whitespace left by line storage is trimmed from the value.
    /// Lines without a separator are not records.
    pub fn parse_line(line: &str) -> Option<Self> {
        let (label, value) = line.split_once(';')?;
        Some(Self::new(label, trim_stored(value)))
    }

    /// Whether the pair can be stored without corrupting the line format
    pub fn is_storable(&self) -> bool {
        !self.label.is_empty()
            && !self.value.is_empty()
            && !self.label.contains([';', '\n', '\r'])
            && !self.value.contains(['\n', '\r'])
    }
}

impl fmt::Display for ReferenceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};{}", self.label, self.value)
    }
}

fn trim_stored(value: &str) -> &str {
    value.trim_end_matches([' ', '\t', '\n', '\r', '\0', '\x0B'])
}
