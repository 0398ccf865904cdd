/// The text the user wants encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputForm {
    text: String,
}

impl InputForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The payload to submit, or `None` when there is nothing but whitespace.
    /// The text is sent as typed; trimming only decides emptiness.
    pub fn submission(&self) -> Option<String> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(self.text.clone())
        }
    }
}
