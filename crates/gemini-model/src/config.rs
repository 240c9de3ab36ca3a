/// The instruction wrapped around every user message. `{message}` is
/// replaced by the trimmed user input.
pub const DEFAULT_INSTRUCTION_TEMPLATE: &str = "\
You are an AI assistant built for social good as part of the Gemini 3 Hackathon. \
Your responses should be helpful, ethical, and focused on positive impact.

User message: {message}

Please provide a thoughtful and helpful response.";

const MESSAGE_PLACEHOLDER: &str = "{message}";

/// Builder for [`GeminiConfig`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GeminiConfigBuilder {
    model: Option<String>,
    base_url: Option<String>,
    instruction_template: Option<String>,
}

impl GeminiConfigBuilder {
    /// Creates a builder with every option left at its default.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the model to use.
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets a custom base URL, e.g. for a proxy or a local mock server.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the instruction template. The template should contain a
    /// `{message}` placeholder, otherwise the user message is appended
    /// after it.
    #[inline]
    pub fn with_instruction_template<S: Into<String>>(
        mut self,
        template: S,
    ) -> Self {
        self.instruction_template = Some(template.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> GeminiConfig {
        let base_url = self.base_url.unwrap_or_else(|| {
            "https://generativelanguage.googleapis.com/v1beta".to_string()
        });
        GeminiConfig {
            model: self
                .model
                .unwrap_or_else(|| "gemini-3-flash-preview".to_string()),
            base_url: base_url.trim_end_matches('/').to_owned(),
            instruction_template: self
                .instruction_template
                .unwrap_or_else(|| DEFAULT_INSTRUCTION_TEMPLATE.to_string()),
        }
    }
}

/// Configuration for the Gemini provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GeminiConfig {
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) instruction_template: String,
}

impl GeminiConfig {
    /// Returns the model name.
    #[inline]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the base URL, without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn render_prompt(&self, message: &str) -> String {
        if self.instruction_template.contains(MESSAGE_PLACEHOLDER) {
            self.instruction_template
                .replace(MESSAGE_PLACEHOLDER, message)
        } else {
            format!("{}\n\n{message}", self.instruction_template)
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfigBuilder::new().build()
    }
}
