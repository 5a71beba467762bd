//! Rows displayed in the panel.

/// One row descriptor from a declarative source, before it becomes a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub value: String,
    pub label: Option<String>,
    pub detail: Option<String>,
}

impl SourceItem {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
            detail: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Build an item from an option-like descriptor.
    ///
    /// With an explicit `label` attribute the text content becomes the
    /// detail line; without one the text content is the label.
    pub fn from_option(value: &str, label_attr: Option<&str>, text: &str) -> Self {
        match label_attr {
            Some(label) => Self::new(value).label(label).detail(text),
            None => Self::new(value).label(text),
        }
    }
}

impl From<&str> for SourceItem {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<(&str, &str)> for SourceItem {
    fn from((value, label): (&str, &str)) -> Self {
        Self::new(value).label(label)
    }
}

impl From<(&str, &str, &str)> for SourceItem {
    fn from((value, label, detail): (&str, &str, &str)) -> Self {
        Self::new(value).label(label).detail(detail)
    }
}

/// A selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    value: String,
    label: String,
    detail: Option<String>,
    /// Filtered out by the last query.
    pub(crate) hidden: bool,
    /// Last visible row; drawn without a trailing separator.
    pub(crate) no_border_bottom: bool,
}

impl Row {
    /// Create a row. An absent or empty label falls back to the value.
    pub fn new(value: impl Into<String>, label: Option<String>, detail: Option<String>) -> Self {
        let value = value.into();
        let label = label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| value.clone());
        Self {
            value,
            label,
            detail,
            hidden: false,
            no_border_bottom: false,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Heading text.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Full rendered text: heading followed by the detail line.
    pub fn text(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{}{}", self.label, detail),
            None => self.label.clone(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn has_no_border_bottom(&self) -> bool {
        self.no_border_bottom
    }
}

impl From<SourceItem> for Row {
    fn from(item: SourceItem) -> Self {
        Row::new(item.value, item.label, item.detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_value() {
        assert_eq!(Row::new("v", None, None).label(), "v");
        assert_eq!(Row::new("v", Some(String::new()), None).label(), "v");
        assert_eq!(Row::new("v", Some("Label".into()), None).label(), "Label");
    }

    #[test]
    fn test_text_joins_label_and_detail() {
        let row = Row::new("fr", Some("France".into()), Some("Europe".into()));
        assert_eq!(row.text(), "FranceEurope");
        assert_eq!(row.value(), "fr");
    }

    #[test]
    fn test_from_option() {
        let with_label = SourceItem::from_option("par", Some("Paris"), "France");
        assert_eq!(with_label, SourceItem::new("par").label("Paris").detail("France"));

        let without = SourceItem::from_option("ber", None, "Berlin");
        assert_eq!(without, SourceItem::new("ber").label("Berlin"));
    }
}
