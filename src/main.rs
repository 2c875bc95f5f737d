use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use planwise_cli::{
    display_banner, display_footer, display_plan, display_step, display_suggestion,
    parse_yes_no, EventAdvisor, PlanReport, Prompter, SuggestionOverrides,
};
use planwise_core::{
    AudienceType, EventRequest, EventType, LLMProvider, PlanningEngine, RandomSuggestionSource,
    StaticTextSource, SuggestionSource, TechRequirement,
};
use planwise_hf::{HuggingFaceClient, HuggingFaceConfig};

/// Where audience and tech suggestions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceKind {
    /// Hugging Face inference API
    Hf,
    /// Random placeholder, no model involved
    Random,
    /// Parse a saved model response (see --response-file)
    Text,
}

#[derive(Parser)]
#[command(name = "planwise")]
#[command(about = "PlanWise - smart event planner", long_about = None)]
struct Cli {
    /// Event type (Conference, Concert, Festival, "Networking Event", Exhibition, Workshop)
    #[arg(short, long)]
    event_type: Option<EventType>,

    /// Duration in hours (1-24)
    #[arg(short, long)]
    duration: Option<u32>,

    /// Budget in rupees (at least 1000)
    #[arg(short, long)]
    budget: Option<u64>,

    /// Whether catering is required (yes/no)
    #[arg(short, long, value_parser = parse_catering)]
    catering: Option<bool>,

    /// Suggestion source
    #[arg(short, long, value_enum, default_value_t = SourceKind::Hf)]
    source: SourceKind,

    /// Saved model response to parse when --source text is used
    #[arg(long, required_if_eq("source", "text"))]
    response_file: Option<PathBuf>,

    /// Seed for the random source
    #[arg(long)]
    seed: Option<u64>,

    /// Hugging Face model to call (overrides HF_MODEL_ID)
    #[arg(long)]
    model: Option<String>,

    /// Seconds to wait for the model before using default suggestions
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Maximum number of tokens the model may generate
    #[arg(long, default_value_t = 200)]
    max_tokens: u32,

    /// Override the suggested audience type
    #[arg(long)]
    audience: Option<AudienceType>,

    /// Override the suggested tech requirement
    #[arg(long)]
    tech: Option<TechRequirement>,

    /// Accept suggestions without asking
    #[arg(short, long)]
    yes: bool,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> SuggestionOverrides {
        SuggestionOverrides {
            audience: self.audience,
            tech: self.tech,
        }
    }

    /// Form flags that were not given on the command line
    fn missing_form_flags(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.event_type.is_none() {
            missing.push("--event-type");
        }
        if self.duration.is_none() {
            missing.push("--duration");
        }
        if self.budget.is_none() {
            missing.push("--budget");
        }
        if self.catering.is_none() {
            missing.push("--catering");
        }
        missing
    }
}

fn parse_catering(s: &str) -> std::result::Result<bool, String> {
    parse_yes_no(s).map_err(|e| e.to_string())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planwise=warn".into()),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.json {
        let missing = cli.missing_form_flags();
        if !missing.is_empty() {
            bail!("--json requires {}", missing.join(", "));
        }
    }

    if !cli.json {
        display_banner();
    }

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    // Step 1: event details
    if !cli.json {
        display_step(1, "Enter Event Details");
    }
    let request = collect_request(&cli, &mut prompter)?;

    let source = build_source(&cli).await?;
    let engine = PlanningEngine::new(source);

    if !cli.json {
        println!("{} Asking for suggestions...", "🤖".blue());
    }
    let sourced = engine.suggest(&request).await;

    // Step 2: confirm suggestions
    let suggestion = if cli.json {
        cli.overrides().apply(sourced.suggestion)
    } else {
        display_step(2, "Confirm AI Suggestions");
        display_suggestion(&sourced);
        prompter.confirm_suggestion(sourced.suggestion, &cli.overrides(), cli.yes)?
    };

    let plan = engine.evaluate(&request, suggestion);

    if cli.json {
        println!("{}", PlanReport::new(&sourced, &plan).to_json()?);
    } else {
        display_plan(&plan);
        display_footer(&sourced.origin);
    }

    Ok(())
}

/// Fill in the form from flags, asking for anything missing
fn collect_request<R: BufRead, W: Write>(
    cli: &Cli,
    prompter: &mut Prompter<R, W>,
) -> Result<EventRequest> {
    let event_type = match cli.event_type {
        Some(t) => t,
        None => prompter.select("Event Type", &EventType::all(), Some(0))?,
    };

    let duration_hours = match cli.duration {
        Some(d) => d,
        None => prompter.number(
            "Duration (hours)",
            u64::from(EventRequest::MIN_DURATION_HOURS),
            Some(u64::from(EventRequest::MAX_DURATION_HOURS)),
        )? as u32,
    };

    let user_budget = match cli.budget {
        Some(b) => b,
        None => prompter.number("Budget (₹)", EventRequest::MIN_BUDGET, None)?,
    };

    let catering_required = match cli.catering {
        Some(c) => c,
        None => prompter.yes_no("Catering Required?", true)?,
    };

    EventRequest::new(event_type, duration_hours, user_budget, catering_required)
        .context("invalid event details")
}

async fn build_source(cli: &Cli) -> Result<Box<dyn SuggestionSource>> {
    let source: Box<dyn SuggestionSource> = match cli.source {
        SourceKind::Hf => {
            let client = match HuggingFaceClient::from_env() {
                Ok(client) => client,
                Err(e) => {
                    warn!(error = %e, "Hugging Face not configured");
                    HuggingFaceClient::new(HuggingFaceConfig::new(String::new()))?
                }
            };
            let mut client = match &cli.model {
                Some(model) => client.with_model(model),
                None => client,
            };

            if let Err(e) = client.connect().await {
                // The advisor turns the failed call into default suggestions.
                warn!(error = %e, "could not connect to Hugging Face");
            }

            Box::new(
                EventAdvisor::new(client)
                    .with_timeout(Duration::from_secs(cli.timeout_secs))
                    .with_max_tokens(cli.max_tokens),
            )
        }
        SourceKind::Random => Box::new(match cli.seed {
            Some(seed) => RandomSuggestionSource::with_seed(seed),
            None => RandomSuggestionSource::new(),
        }),
        SourceKind::Text => {
            let Some(path) = &cli.response_file else {
                bail!("--source text requires --response-file");
            };
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Box::new(StaticTextSource::new(text))
        }
    };

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwise_core::Suggestion;
    use std::io::Cursor;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("planwise").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_missing_form_flags() {
        let cli = parse(&["--json", "--event-type", "Workshop", "--catering", "no"]);
        assert_eq!(cli.missing_form_flags(), vec!["--duration", "--budget"]);

        let cli = parse(&[
            "-e", "networking event", "-d", "3", "-b", "60000", "-c", "yes",
        ]);
        assert!(cli.missing_form_flags().is_empty());
        assert_eq!(cli.event_type, Some(EventType::NetworkingEvent));
        assert_eq!(cli.catering, Some(true));
    }

    #[test]
    fn test_override_flags_apply_to_suggestion() {
        let cli = parse(&["--audience", "students", "--yes"]);
        let suggested = Suggestion::new(AudienceType::Public, TechRequirement::High);

        assert_eq!(
            cli.overrides().apply(suggested),
            Suggestion::new(AudienceType::Students, TechRequirement::High)
        );

        let mut prompter = Prompter::new(Cursor::new(Vec::new()), Vec::new());
        let confirmed = prompter
            .confirm_suggestion(suggested, &cli.overrides(), cli.yes)
            .unwrap();
        assert_eq!(confirmed, Suggestion::new(AudienceType::Students, TechRequirement::High));
    }

    #[test]
    fn test_invalid_flag_values_rejected() {
        let args = ["planwise", "--catering", "maybe"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["planwise", "--tech", "extreme"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_text_source_requires_response_file() {
        assert!(Cli::try_parse_from(["planwise", "--source", "text"]).is_err());
        let cli = parse(&["--source", "text", "--response-file", "answer.txt"]);
        assert_eq!(cli.source, SourceKind::Text);
    }

    #[test]
    fn test_collect_request_asks_for_missing_fields() {
        let cli = parse(&["--event-type", "Conference", "--catering", "yes"]);
        let mut prompter = Prompter::new(Cursor::new(b"5\n125000\n".to_vec()), Vec::new());

        let request = collect_request(&cli, &mut prompter).unwrap();

        assert_eq!(
            request,
            EventRequest::new(EventType::Conference, 5, 125_000, true).unwrap()
        );
    }
}
