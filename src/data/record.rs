/// A single labeled text sample.
///
/// The loader guarantees `text` stays strictly below the configured capacity
/// and `label` is one of the two configured class codes; nothing downstream
/// re-checks either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    text: String,
    label: i32,
}

impl Record {
    pub fn new(text: impl Into<String>, label: i32) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn label(&self) -> i32 {
        self.label
    }
}
