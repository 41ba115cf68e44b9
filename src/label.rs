use crate::error::ConfigurationError;

/// A binary classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Positive,
    Negative,
}

impl Label {
    /// Whether this label is the positive class
    pub fn is_positive(self) -> bool {
        matches!(self, Label::Positive)
    }
}

/// The two literal strings a label column may contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDomain {
    pub positive: String,
    pub negative: String,
}

impl Default for LabelDomain {
    fn default() -> Self {
        Self {
            positive: "Yes".to_string(),
            negative: "No".to_string(),
        }
    }
}

impl LabelDomain {
    /// Create a domain, rejecting identical positive and negative strings
    pub fn new(positive: &str, negative: &str) -> Result<Self, ConfigurationError> {
        let positive = positive.trim();
        let negative = negative.trim();
        if positive == negative {
            return Err(ConfigurationError::IndistinctClasses(positive.to_string()));
        }

        Ok(Self {
            positive: positive.to_string(),
            negative: negative.to_string(),
        })
    }

    /// Parse a single cell; surrounding whitespace is ignored
    pub fn parse(&self, raw: &str) -> Option<Label> {
        let value = raw.trim();
        if value == self.positive {
            Some(Label::Positive)
        } else if value == self.negative {
            Some(Label::Negative)
        } else {
            None
        }
    }

    /// Parse a whole column, failing on the first value outside the domain
    pub fn parse_column(
        &self,
        column: &str,
        values: &[String],
    ) -> Result<Vec<Label>, ConfigurationError> {
        values
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                self.parse(raw)
                    .ok_or_else(|| ConfigurationError::UnexpectedLevel {
                        column: column.to_string(),
                        row: index + 1,
                        level: raw.clone(),
                        positive: self.positive.clone(),
                        negative: self.negative.clone(),
                    })
            })
            .collect()
    }

    /// The literal string for a label
    pub fn render(&self, label: Label) -> &str {
        match label {
            Label::Positive => &self.positive,
            Label::Negative => &self.negative,
        }
    }
}
