//! Prompt catalogue for the seven code analyses.

use serde::{Deserialize, Serialize};

use crate::llm::{ChatRequest, Message};

/// Inbound body shared by every analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeRequest {
    pub code: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub target_language: Option<String>,
}

fn default_language() -> String {
    "python".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateDocstring,
    ExplainCode,
    AnalyzeQuality,
    TranslateLanguage,
    SuggestRefactoring,
    GenerateTests,
    ComplexityAnalysis,
}

/// Fully assembled prompt for one upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
}

impl From<Prompt> for ChatRequest {
    fn from(prompt: Prompt) -> Self {
        ChatRequest {
            messages: vec![Message::system(prompt.system), Message::user(prompt.user)],
            max_tokens: prompt.max_tokens,
        }
    }
}

/// Response envelope returned by every analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub result: String,
    pub success: bool,
    pub model_used: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TranslationMetadata>,
}

/// Language pair recorded on translation responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMetadata {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("code must not be empty")]
    EmptyCode,
    #[error("target_language required")]
    MissingTargetLanguage,
}

impl Operation {
    pub const ALL: [Operation; 7] = [
        Operation::GenerateDocstring,
        Operation::ExplainCode,
        Operation::AnalyzeQuality,
        Operation::TranslateLanguage,
        Operation::SuggestRefactoring,
        Operation::GenerateTests,
        Operation::ComplexityAnalysis,
    ];

    /// Path segment under `/api/v1/`
    pub fn slug(self) -> &'static str {
        match self {
            Operation::GenerateDocstring => "generate-docstring",
            Operation::ExplainCode => "explain-code",
            Operation::AnalyzeQuality => "analyze-quality",
            Operation::TranslateLanguage => "translate-language",
            Operation::SuggestRefactoring => "suggest-refactoring",
            Operation::GenerateTests => "generate-tests",
            Operation::ComplexityAnalysis => "complexity-analysis",
        }
    }

    /// Tag advertised by `GET /`
    pub fn feature(self) -> &'static str {
        match self {
            Operation::GenerateDocstring => "documentation-generation",
            Operation::ExplainCode => "code-explanation",
            Operation::AnalyzeQuality => "quality-analysis",
            Operation::TranslateLanguage => "language-translation",
            Operation::SuggestRefactoring => "refactoring-suggestions",
            Operation::GenerateTests => "test-generation",
            Operation::ComplexityAnalysis => "complexity-analysis",
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            Operation::GenerateDocstring => {
                "You are an expert technical writer specializing in code documentation."
            }
            Operation::ExplainCode => {
                "You are a patient programming teacher who explains code clearly."
            }
            Operation::AnalyzeQuality => {
                "You are a senior code reviewer focusing on quality, security, and best practices."
            }
            Operation::TranslateLanguage => {
                "You are an expert programmer fluent in all programming languages."
            }
            Operation::SuggestRefactoring => {
                "You are a code optimization expert focused on clean code principles."
            }
            Operation::GenerateTests => {
                "You are a testing expert who writes comprehensive test suites."
            }
            Operation::ComplexityAnalysis => {
                "You are a computer science expert specializing in algorithm analysis."
            }
        }
    }

    pub fn max_tokens(self) -> u32 {
        match self {
            Operation::GenerateDocstring => 500,
            Operation::ExplainCode | Operation::TranslateLanguage | Operation::ComplexityAnalysis => 800,
            Operation::AnalyzeQuality | Operation::SuggestRefactoring | Operation::GenerateTests => 1000,
        }
    }

    /// Check the request before any upstream call. Returns the target language for
    /// translation, `None` otherwise.
    pub fn validate<'a>(self, request: &'a CodeRequest) -> Result<Option<&'a str>, ValidationError> {
        if request.code.is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        if self != Operation::TranslateLanguage {
            return Ok(None);
        }
        match request.target_language.as_deref() {
            Some(target) if !target.is_empty() => Ok(Some(target)),
            _ => Err(ValidationError::MissingTargetLanguage),
        }
    }

    /// Interpolate the request into this operation's template. Code is inserted verbatim.
    pub fn build_prompt(self, request: &CodeRequest) -> Result<Prompt, ValidationError> {
        let target = self.validate(request)?;
        let language = request.language.as_str();
        let code = request.code.as_str();

        let user = match self {
            Operation::GenerateDocstring => format!(
                "Generate comprehensive documentation for this {language} code.\n\
                 Include: description, parameters, returns, raises, examples, and complexity notes.\n\
                 \n\
                 Code:\n\
                 {code}"
            ),
            Operation::ExplainCode => format!(
                "Explain this {language} code step-by-step for someone learning to code.\n\
                 Break down each part and explain the logic.\n\
                 \n\
                 Code:\n\
                 {code}"
            ),
            Operation::AnalyzeQuality => format!(
                "Analyze this {language} code for:\n\
                 1. Security vulnerabilities\n\
                 2. Performance issues\n\
                 3. Code smells and anti-patterns\n\
                 4. Best practices violations\n\
                 5. Maintainability concerns\n\
                 \n\
                 Rate overall quality (1-10) and provide specific improvements.\n\
                 \n\
                 Code:\n\
                 {code}"
            ),
            Operation::TranslateLanguage => {
                let target = target.unwrap_or_default();
                format!(
                    "Convert this {language} code to {target}.\n\
                     Maintain the same functionality and add comments explaining any language-specific differences.\n\
                     \n\
                     Original {language} code:\n\
                     {code}\n\
                     \n\
                     Provide only the translated {target} code with explanatory comments."
                )
            }
            Operation::SuggestRefactoring => format!(
                "Refactor this {language} code to improve:\n\
                 1. Readability\n\
                 2. Performance\n\
                 3. Maintainability\n\
                 4. Following SOLID principles\n\
                 \n\
                 Show before/after comparison and explain each improvement.\n\
                 \n\
                 Original code:\n\
                 {code}"
            ),
            Operation::GenerateTests => format!(
                "Generate unit tests for this {language} code.\n\
                 Include:\n\
                 1. Happy path tests\n\
                 2. Edge cases\n\
                 3. Error conditions\n\
                 4. Boundary value tests\n\
                 \n\
                 Use appropriate testing framework (pytest, jest, junit, etc.).\n\
                 \n\
                 Code to test:\n\
                 {code}"
            ),
            Operation::ComplexityAnalysis => format!(
                "Analyze the complexity of this {language} code:\n\
                 1. Time complexity (Big O notation)\n\
                 2. Space complexity\n\
                 3. Cyclomatic complexity\n\
                 4. Cognitive complexity\n\
                 5. Maintainability index estimate\n\
                 \n\
                 Explain your reasoning and suggest optimizations if possible.\n\
                 \n\
                 Code:\n\
                 {code}"
            ),
        };

        Ok(Prompt {
            system: self.system_prompt().to_string(),
            user,
            max_tokens: self.max_tokens(),
        })
    }
}
