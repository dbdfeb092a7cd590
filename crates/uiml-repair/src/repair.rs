use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;
use uiml_markup::ComponentNode;
use uiml_markup::MarkupParser;
use uiml_markup::ParseError;
use uiml_markup::Precomposed;
use uiml_source::splice_window;
use uiml_source::ContextWindow;

use crate::chat::ChatClient;
use crate::cost::CostModel;
use crate::prompt::strip_code_fences;
use crate::prompt::RepairPrompt;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Outcome of a parse with repair.
///
/// `nodes` is present exactly when `success` is set, and `error` exactly
/// when it is not. Zero attempts means the input parsed as given.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RepairResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<ComponentNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attempts: u32,
    pub cost: f64,
    /// The source the final parse ran on, with any patches applied.
    pub source: String,
}

impl RepairResult {
    fn success(nodes: Vec<ComponentNode>, attempts: u32, cost: f64, source: String) -> Self {
        Self {
            success: true,
            nodes: Some(nodes),
            error: None,
            attempts,
            cost,
            source,
        }
    }

    fn failure(error: &ParseError, attempts: u32, cost: f64, source: String) -> Self {
        Self {
            success: false,
            nodes: None,
            error: Some(error.message.clone()),
            attempts,
            cost,
            source,
        }
    }
}

/// Parses markup and, on failure, asks a chat model to fix the failing
/// window until the markup parses or the attempt budget runs out.
pub struct Repairer<C> {
    parser: MarkupParser,
    client: C,
    cost_model: CostModel,
    max_output_tokens: u32,
    temperature: Option<f64>,
}

impl<C: ChatClient> Repairer<C> {
    #[must_use]
    pub fn new(parser: MarkupParser, client: C) -> Self {
        Self {
            parser,
            client,
            cost_model: CostModel::default(),
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            temperature: Some(DEFAULT_TEMPERATURE),
        }
    }

    #[must_use]
    pub fn with_cost_model(mut self, cost_model: CostModel) -> Self {
        self.cost_model = cost_model;
        self
    }

    #[must_use]
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    #[must_use]
    pub fn parser(&self) -> &MarkupParser {
        &self.parser
    }

    /// Names offered to the model: registry types, `Table`, and the
    /// precomposed shorthands.
    #[must_use]
    pub fn component_names(&self) -> Vec<String> {
        let mut names = self.parser.valid_component_names();
        names.extend(Precomposed::ALL.iter().map(|p| p.name().to_string()));
        names.sort();
        names.dedup();
        names
    }

    pub async fn parse_markup_with_repair(&self, source: &str, max_attempts: u32) -> RepairResult {
        let mut current = source.to_string();
        let mut error = match self.parser.parse(&current) {
            Ok(nodes) => return RepairResult::success(nodes, 0, 0.0, current),
            Err(error) => error,
        };

        let names = self.component_names();
        let mut attempts = 0;
        let mut cost = 0.0;

        while attempts < max_attempts {
            attempts += 1;

            let window = ContextWindow::around(&current, error.line);
            let request = RepairPrompt::new(&error, &window, &names)
                .request(self.max_output_tokens, self.temperature);

            info!(
                attempt = attempts,
                line = error.line,
                column = error.column,
                "requesting repair: {}",
                error.message
            );

            let reply = match self.client.send(&request).await {
                Ok(reply) => reply,
                Err(err) => {
                    warn!(attempt = attempts, "repair request failed: {err}");
                    continue;
                }
            };

            cost += self
                .cost_model
                .estimate(request.char_count(), reply.content.chars().count());

            let replacement = strip_code_fences(&reply.content);
            current = splice_window(&current, &window, replacement);
            debug!(
                attempt = attempts,
                start = window.start_line(),
                end = window.end_line(),
                "spliced repair into source"
            );

            match self.parser.parse(&current) {
                Ok(nodes) => {
                    info!(attempts, cost, "markup repaired");
                    return RepairResult::success(nodes, attempts, cost, current);
                }
                Err(next) => error = next,
            }
        }

        warn!(attempts, cost, "giving up on repair: {}", error.message);
        RepairResult::failure(&error, attempts, cost, current)
    }
}
