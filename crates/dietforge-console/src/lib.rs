//! Colorful console output for planning events.
//!
//! Provides a `tracing` layer that formats planner events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Planning start and end
//! - **WARN**: Skipped catalog entries and skipped organs
//! - **DEBUG**: One line per organ planned by the knapsack
//! - **TRACE**: Individual interaction branch decisions

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static PLAN_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_FILTER: &str = "dietforge_solver=info,dietforge=info";

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes the planner console output.
///
/// Safe to call multiple times, only the first call has effect. Honors
/// `RUST_LOG` and falls back to INFO for the planner crates.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(DietConsoleLayer)
            .try_init();
    });
}

fn mark_plan_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    PLAN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = PLAN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____  _      _   _____
|  _ \(_) ___| |_|  ___|__  _ __ __ _  ___
| | | | |/ _ \ __| |_ / _ \| '__/ _` |/ _ \
| |_| | |  __/ |_|  _| (_) | | | (_| |  __/
|____/|_|\___|\__|_|  \___/|_|  \__, |\___|
                                |___/
"#;

    let version_line = format!("              v{} - Consumption Planner\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats planner events with colors.
pub struct DietConsoleLayer;

impl<S: Subscriber> Layer<S> for DietConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("dietforge_solver") && !target.starts_with("dietforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    entry: Option<String>,
    organ: Option<String>,
    error: Option<String>,
    decision: Option<String>,
    mpa: Option<f64>,
    value: Option<f64>,
    adventures: Option<f64>,
    entries: Option<u64>,
    interacting: Option<u64>,
    chosen: Option<u64>,
    depth: Option<u64>,
    branches: Option<u64>,
    skipped: Option<u64>,
    duration_ms: Option<u64>,
    capacity: Option<i64>,
    food: Option<i64>,
    booze: Option<i64>,
    spleen: Option<i64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "entry" => self.entry = Some(s),
            "organ" => self.organ = Some(s),
            "error" => self.error = Some(s),
            "decision" => self.decision = Some(s),
            _ => {}
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "mpa" => self.mpa = Some(value),
            "value" => self.value = Some(value),
            "adventures" => self.adventures = Some(value),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "entries" => self.entries = Some(value),
            "interacting" => self.interacting = Some(value),
            "chosen" => self.chosen = Some(value),
            "depth" => self.depth = Some(value),
            "branches" => self.branches = Some(value),
            "skipped" => self.skipped = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "capacity" => self.capacity = Some(value),
            "food" => self.food = Some(value),
            "booze" => self.booze = Some(value),
            "spleen" => self.spleen = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "entry" => self.entry = Some(value.to_string()),
            "organ" => self.organ = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            "decision" => self.decision = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "plan_start" => format_plan_start(v),
        "plan_end" => format_plan_end(v),
        "organ_planned" => format_organ_planned(v),
        "organ_skipped" => format_organ_skipped(v),
        "entry_skipped" => format_entry_skipped(v),
        "branch" => format_branch(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_plan_start(v: &EventVisitor) -> String {
    mark_plan_start();
    let entries = v.entries.unwrap_or(0);
    let interacting = v.interacting.unwrap_or(0);

    format!(
        "{} {} Planning │ {} entries │ {} interacting │ {} per adventure │ capacity {}/{}/{}",
        format_elapsed(),
        "▶".bright_green().bold(),
        entries.to_formatted_string(&Locale::en).bright_yellow(),
        interacting.to_formatted_string(&Locale::en).bright_yellow(),
        format_meat(v.mpa.unwrap_or(0.0)).bright_magenta(),
        v.food.unwrap_or(0),
        v.booze.unwrap_or(0),
        v.spleen.unwrap_or(0),
    )
}

fn format_plan_end(v: &EventVisitor) -> String {
    let branches = v.branches.unwrap_or(0);
    let skipped = v.skipped.unwrap_or(0);
    let adventures = v.adventures.unwrap_or(0.0);
    let value = v.value.unwrap_or(0.0);

    let mut output = format!(
        "{} {} Planning complete │ {} │ {} branches │ {} skipped",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        branches.to_formatted_string(&Locale::en).white(),
        skipped.to_formatted_string(&Locale::en).white(),
    );

    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');
    output.push_str(&summary_row("Expected adventures:", &format!("{:.2}", adventures)));
    output.push('\n');
    output.push_str(&summary_row("Net value:", &format_meat(value)));
    output.push('\n');
    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn summary_row(label: &str, value: &str) -> String {
    format!(
        "{}  {:<22}{:>32}  {}",
        "║".bright_cyan(),
        label,
        value,
        "║".bright_cyan()
    )
}

fn format_organ_planned(v: &EventVisitor) -> String {
    let organ = v.organ.as_deref().unwrap_or("?");
    let capacity = v.capacity.unwrap_or(0);
    let chosen = v.chosen.unwrap_or(0);

    format!(
        "{} {} {:<7} │ capacity {:>3} │ {} picks │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        organ.white().bold(),
        capacity,
        chosen,
        format_value(v.value.unwrap_or(0.0))
    )
}

fn format_organ_skipped(v: &EventVisitor) -> String {
    let organ = v.organ.as_deref().unwrap_or("?");
    format!(
        "{} {} {} skipped │ capacity {}",
        format_elapsed(),
        "!".yellow().bold(),
        organ.white().bold(),
        v.capacity.unwrap_or(0).bright_red()
    )
}

fn format_entry_skipped(v: &EventVisitor) -> String {
    format!(
        "{} {} {} skipped │ {}",
        format_elapsed(),
        "!".yellow().bold(),
        v.entry.as_deref().unwrap_or("?").white(),
        v.error.as_deref().unwrap_or("").yellow()
    )
}

fn format_branch(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let depth = v.depth.unwrap_or(0) as usize;
    let entry = v.entry.as_deref().unwrap_or("?");
    let decision = v.decision.as_deref().unwrap_or("?");

    let icon = match decision {
        "with" => "✓".bright_green().to_string(),
        "without" => "✗".bright_red().to_string(),
        _ => "·".bright_black().to_string(),
    };

    let mut output = format!(
        "{} {}{} {} │ {}",
        format_elapsed(),
        "  ".repeat(depth),
        icon,
        entry.bright_black(),
        decision.bright_black()
    );
    if let Some(value) = v.value {
        output.push_str(&format!(" │ {}", format_value(value)));
    }
    output
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Whole meat with thousands separators, sign kept.
fn format_meat(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_formatted_string(&Locale::en);
    if rounded < 0 {
        format!("-{} meat", digits)
    } else {
        format!("{} meat", digits)
    }
}

fn format_value(value: f64) -> String {
    let text = format_meat(value);
    if value < 0.0 {
        text.bright_red().to_string()
    } else if value > 0.0 {
        text.bright_green().to_string()
    } else {
        text.white().to_string()
    }
}
