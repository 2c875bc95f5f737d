//! Terminal form and plan rendering

use colored::*;
use crossterm::terminal::size;
use serde::Serialize;
use std::fmt::Display;
use std::io::{BufRead, Write};

use planwise_core::{
    AudienceType, EventPlan, Error, Result, SourcedSuggestion, Suggestion, SuggestionOrigin,
    TechRequirement,
};

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(60, terminal_width.saturating_sub(4)).max(40);
    let inner = banner_width - 2;

    let top_border = format!("┌{}┐", "─".repeat(inner));
    let bottom_border = format!("└{}┘", "─".repeat(inner));
    let empty_line = format!("│{}│", " ".repeat(inner));

    println!();
    println!("{}", top_border.green());
    println!("{}", empty_line.green());

    let lines = [
        "🎪 PlanWise - Smart Event Planner",
        "AI-powered interactive event management",
    ];
    for line in lines {
        let padding = inner.saturating_sub(line.chars().count() + 2);
        println!("{}  {}{}{}", "│".green(), line.bold(), " ".repeat(padding), "│".green());
    }

    println!("{}", empty_line.green());
    println!("{}", bottom_border.green());
    println!();
}

/// Print a numbered step heading
pub fn display_step(number: u32, title: &str) {
    println!();
    println!("{}", format!("Step {}: {}", number, title).bold().underline());
}

/// Reads form answers from any line source, re-asking on invalid input
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Error::InvalidInput("input closed before the form was complete".to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// Choose one of `options` by number or by name
    pub fn select<T: Copy + Display>(
        &mut self,
        label: &str,
        options: &[T],
        default: Option<usize>,
    ) -> Result<T> {
        writeln!(self.output, "{}", label.cyan().bold())?;
        for (i, option) in options.iter().enumerate() {
            let marker = if Some(i) == default { "*" } else { " " };
            writeln!(self.output, " {} {}. {}", marker, i + 1, option)?;
        }

        loop {
            match default {
                Some(i) => write!(self.output, "Choice [{}]: ", i + 1)?,
                None => write!(self.output, "Choice: ")?,
            }
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.is_empty() {
                if let Some(i) = default.filter(|i| *i < options.len()) {
                    return Ok(options[i]);
                }
            } else if let Ok(n) = answer.parse::<usize>() {
                if (1..=options.len()).contains(&n) {
                    return Ok(options[n - 1]);
                }
            } else if let Some(option) = options
                .iter()
                .find(|o| o.to_string().eq_ignore_ascii_case(&answer))
            {
                return Ok(*option);
            }

            writeln!(
                self.output,
                "{} Please enter a number between 1 and {}",
                "⚠️".yellow(),
                options.len()
            )?;
        }
    }

    /// Ask for a whole number within `min..=max`
    pub fn number(&mut self, label: &str, min: u64, max: Option<u64>) -> Result<u64> {
        loop {
            match max {
                Some(max) => write!(self.output, "{} ({}-{}): ", label.cyan().bold(), min, max)?,
                None => write!(self.output, "{} (min {}): ", label.cyan().bold(), min)?,
            }
            self.output.flush()?;

            let answer = self.read_line()?;
            match answer.replace(',', "").parse::<u64>() {
                Ok(n) if n >= min && max.map_or(true, |max| n <= max) => return Ok(n),
                _ => writeln!(self.output, "{} Not a valid value: '{}'", "⚠️".yellow(), answer)?,
            }
        }
    }

    /// Ask a yes/no question
    pub fn yes_no(&mut self, label: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(self.output, "{} {}: ", label.cyan().bold(), hint)?;
            self.output.flush()?;

            let answer = self.read_line()?;
            if answer.is_empty() {
                return Ok(default);
            }
            match parse_yes_no(&answer) {
                Ok(value) => return Ok(value),
                Err(_) => writeln!(self.output, "{} Please answer yes or no", "⚠️".yellow())?,
            }
        }
    }

    /// Let the user keep or change each suggested field.
    ///
    /// Fields fixed by `overrides` are not asked about; with `accept` set
    /// nothing is asked at all.
    pub fn confirm_suggestion(
        &mut self,
        suggested: Suggestion,
        overrides: &SuggestionOverrides,
        accept: bool,
    ) -> Result<Suggestion> {
        let suggestion = overrides.apply(suggested);
        if accept {
            return Ok(suggestion);
        }

        let audience_type = match overrides.audience {
            Some(a) => a,
            None => {
                let options = AudienceType::all();
                let default = options.iter().position(|a| *a == suggestion.audience_type);
                self.select("Audience Type", &options, default)?
            }
        };

        let tech_requirement = match overrides.tech {
            Some(t) => t,
            None => {
                let options = TechRequirement::all();
                let default = options.iter().position(|t| *t == suggestion.tech_requirement);
                self.select("Tech Requirement", &options, default)?
            }
        };

        Ok(Suggestion::new(audience_type, tech_requirement))
    }
}

/// Fields the user fixed up front, replacing whatever was suggested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SuggestionOverrides {
    pub audience: Option<AudienceType>,
    pub tech: Option<TechRequirement>,
}

impl SuggestionOverrides {
    pub fn apply(&self, suggestion: Suggestion) -> Suggestion {
        Suggestion::new(
            self.audience.unwrap_or(suggestion.audience_type),
            self.tech.unwrap_or(suggestion.tech_requirement),
        )
    }
}

/// Parse a yes/no answer
pub fn parse_yes_no(s: &str) -> Result<bool> {
    match s.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => Err(Error::InvalidInput(format!("expected yes or no, got '{}'", other))),
    }
}

/// Text progress bar for a 0-100 score
pub fn progress_bar(score: u8, width: usize) -> String {
    let filled = (usize::from(score.min(100)) * width) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Show the model message and its suggestion
pub fn display_suggestion(sourced: &SourcedSuggestion) {
    if !sourced.message.is_empty() {
        let fell_back = matches!(sourced.origin, SuggestionOrigin::Model { fell_back: true, .. });
        if fell_back {
            println!("{} {}", "⚠️".yellow(), sourced.message.yellow());
        } else {
            println!("{}", sourced.message.green());
        }
    }
    display_suggestion_fields(&sourced.suggestion);
}

fn display_suggestion_fields(suggestion: &Suggestion) {
    println!("  {} {}", "Audience Type:".bold(), suggestion.audience_type);
    println!("  {} {}", "Tech Requirement:".bold(), suggestion.tech_requirement);
}

/// Show predicted budget and confidence
pub fn display_plan(plan: &EventPlan) {
    println!("{} Predicted Budget: ₹{}", "💡".cyan(), plan.predicted_budget.to_string().bold());

    display_step(3, "Event Success Confidence");
    let score = plan.confidence.score;
    let bar = progress_bar(score, 30);
    let bar = match score {
        0..=33 => bar.red(),
        34..=66 => bar.yellow(),
        _ => bar.green(),
    };
    println!("{}", bar);
    println!("{} {}%", "Confidence Score:".bold(), score);

    let (lower, upper) = plan.confidence.display_range();
    println!("Predicted Budget Range: ₹{} - ₹{}", lower, upper);
    println!("Your Budget: ₹{}", plan.request.user_budget);
}

/// Closing line naming where the suggestion came from
pub fn display_footer(origin: &SuggestionOrigin) {
    println!();
    println!("{}", "─".repeat(40).dimmed());
    println!(
        "{}",
        format!("PlanWise | Suggestions: {}", origin.describe()).dimmed()
    );
}

/// Machine-readable output for `--json`
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub message: &'a str,
    pub origin: &'a SuggestionOrigin,
    pub plan: &'a EventPlan,
}

impl<'a> PlanReport<'a> {
    pub fn new(sourced: &'a SourcedSuggestion, plan: &'a EventPlan) -> Self {
        Self {
            message: &sourced.message,
            origin: &sourced.origin,
            plan,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
