//! Colored console output for pipeline events.
//!
//! Provides a `tracing` layer that renders the structured events emitted by
//! `shiftqubo-solver` and `shiftqubo-core`.
//!
//! ## Log Levels
//!
//! - **INFO**: pipeline and gateway start/end
//! - **WARN**: gateway errors, decode fallback, decode failure
//! - **DEBUG**: emitted model size

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static RUN_START_NANOS: AtomicU64 = AtomicU64::new(0);

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output.
///
/// Safe to call multiple times; only the first call has effect. `RUST_LOG`
/// sets the level for other targets; pipeline events
/// are always shown at `info`.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy();
        for directive in ["shiftqubo_solver=info", "shiftqubo_core=warn"] {
            if let Ok(d) = directive.parse::<Directive>() {
                filter = filter.add_directive(d);
            }
        }

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ShiftQuboConsoleLayer)
            .try_init();
    });
}

fn mark_run_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    RUN_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = RUN_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let line = format!("shiftqubo v{VERSION} - staff scheduling as QUBO");
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}\n", line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats pipeline events with colors.
pub struct ShiftQuboConsoleLayer;

impl<S: Subscriber> Layer<S> for ShiftQuboConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with("shiftqubo_solver") && !target.starts_with("shiftqubo_core") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    gateway: Option<String>,
    environment: Option<String>,
    convention: Option<String>,
    primary: Option<String>,
    failure: Option<String>,
    err: Option<String>,
    staff: Option<u64>,
    days: Option<u64>,
    shifts: Option<u64>,
    variables: Option<u64>,
    linear_terms: Option<u64>,
    quadratic_terms: Option<u64>,
    num_reads: Option<u64>,
    annealing_time: Option<u64>,
    assignments: Option<u64>,
    duration_ms: Option<u64>,
    energy: Option<f64>,
    offset: Option<f64>,
    feasible: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "gateway" => self.gateway = Some(value),
            "environment" => self.environment = Some(value),
            "convention" => self.convention = Some(value),
            "primary" => self.primary = Some(value),
            "failure" => self.failure = Some(value),
            "err" => self.err = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "staff" => self.staff = Some(value),
            "days" => self.days = Some(value),
            "shifts" => self.shifts = Some(value),
            "variables" => self.variables = Some(value),
            "linear_terms" => self.linear_terms = Some(value),
            "quadratic_terms" => self.quadratic_terms = Some(value),
            "num_reads" => self.num_reads = Some(value),
            "annealing_time" => self.annealing_time = Some(value),
            "assignments" => self.assignments = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "energy" => self.energy = Some(value),
            "offset" => self.offset = Some(value),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "feasible" {
            self.feasible = Some(value);
        }
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "pipeline_start" => format_pipeline_start(v),
        "qubo_emitted" => format_qubo_emitted(v),
        "gateway_start" => format_gateway_start(v),
        "gateway_error" => format_gateway_error(v),
        "gateway_end" => format_gateway_end(v),
        "decode_fallback" => format_decode_fallback(v),
        "pipeline_end" => format_pipeline_end(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_pipeline_start(v: &EventVisitor) -> String {
    mark_run_start();
    format!(
        "{} {} Scheduling │ {} staff × {} days × {} shifts │ {} variables",
        format_elapsed(),
        "▶".bright_green().bold(),
        count(v.staff).bright_yellow(),
        count(v.days).bright_yellow(),
        count(v.shifts).bright_yellow(),
        count(v.variables).bright_magenta(),
    )
}

fn format_qubo_emitted(v: &EventVisitor) -> String {
    format!(
        "{} {} QUBO │ {} linear │ {} quadratic │ offset {}",
        format_elapsed(),
        "◆".bright_blue(),
        count(v.linear_terms).white(),
        count(v.quadratic_terms).white(),
        format_energy(v.offset.unwrap_or(0.0)),
    )
}

fn format_gateway_start(v: &EventVisitor) -> String {
    format!(
        "{} {} {} started │ {} │ {} reads │ anneal {}",
        format_elapsed(),
        "▶".bright_blue(),
        v.gateway.as_deref().unwrap_or("gateway").white().bold(),
        v.environment.as_deref().unwrap_or("unknown").bright_yellow(),
        count(v.num_reads).white(),
        count(v.annealing_time).white(),
    )
}

fn format_gateway_error(v: &EventVisitor) -> String {
    format!(
        "{} {} {} failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.gateway.as_deref().unwrap_or("gateway").white().bold(),
        v.err.as_deref().unwrap_or("unknown error").bright_red(),
    )
}

fn format_gateway_end(v: &EventVisitor) -> String {
    format!(
        "{} {} Gateway returned │ {} │ energy {}",
        format_elapsed(),
        "◀".bright_blue(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_energy(v.energy.unwrap_or(0.0)),
    )
}

fn format_decode_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} {} recovered nothing; decoded as {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        v.primary.as_deref().unwrap_or("primary").white(),
        v.convention.as_deref().unwrap_or("secondary").bright_yellow(),
    )
}

fn format_pipeline_end(v: &EventVisitor) -> String {
    let energy = format_energy(v.energy.unwrap_or(0.0));
    let duration = format_duration_ms(v.duration_ms.unwrap_or(0));

    if let Some(failure) = &v.failure {
        return format!(
            "{} {} Decode failed │ {} │ energy {} │ {}",
            format_elapsed(),
            "■".bright_red().bold(),
            duration.yellow(),
            energy,
            failure.bright_red(),
        );
    }

    let status = if v.feasible.unwrap_or(false) {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };
    format!(
        "{} {} Schedule complete │ {} │ {} assignments │ energy {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        duration.yellow(),
        count(v.assignments).white(),
        energy,
        status,
    )
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

fn format_energy(energy: f64) -> String {
    let s = format!("{:.4}", energy);
    if energy < 0.0 {
        s.bright_green().to_string()
    } else {
        s.white().to_string()
    }
}

#[cfg(test)]
mod tests;
