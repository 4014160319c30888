//! Display utilities for the CLI

use colored::*;

use arenadash_rounds::{FeedUpdate, PhaseConsistency, PhaseSchedule, RoundView};
use arenadash_types::PhaseStatus;

const BAR_WIDTH: usize = 40;

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

fn status_marker(status: PhaseStatus) -> ColoredString {
    match status {
        PhaseStatus::Completed => "✓ completed".bright_green(),
        PhaseStatus::Active => "● active".bright_cyan().bold(),
        PhaseStatus::Pending => "○ pending".bright_black(),
    }
}

fn consistency_line(consistency: &PhaseConsistency) -> Option<String> {
    match consistency {
        PhaseConsistency::Consistent => None,
        PhaseConsistency::Mismatch { reported, derived } => Some(format!(
            "reported phase {} but block falls in the {} window",
            reported, derived
        )),
        PhaseConsistency::OutOfRange { current_block } => {
            Some(format!("block {} is past the end of the round", current_block))
        }
        PhaseConsistency::Unscheduled { total_blocks } => Some(format!(
            "a {}-block round is too short to give every phase a window",
            total_blocks
        )),
    }
}

/// Print a full round view
pub fn round_view(view: &RoundView) {
    let title = if view.round_id.as_str().is_empty() {
        "Round".to_string()
    } else {
        format!("Round {}", view.round_id)
    };
    section(&title);

    println!(
        "  {} {:>6.2}%",
        view.progress_bar(BAR_WIDTH).bright_cyan(),
        view.percent
    );
    kv("Block", &format!("{} / {}", view.current_block, view.total_blocks));
    kv("Phase", view.phase.label());
    if let Some(fraction) = view.phase_progress {
        kv("Phase progress", &format!("{:.1}%", fraction * 100.0));
    }
    println!();

    for entry in &view.phases {
        let span = match entry.span {
            Some(span) => format!("{:>6}..{:<6}", span.start, span.end),
            None => format!("{:^14}", "-"),
        };
        println!(
            "  {:<12} {} {}",
            entry.label.bright_white(),
            span,
            status_marker(entry.status)
        );
    }

    if let Some(line) = consistency_line(&view.consistency) {
        println!();
        warning(&line);
    }
}

/// Print one line per feed update
pub fn feed_line(update: &FeedUpdate, view: &RoundView) {
    let tag = match update {
        FeedUpdate::Started { .. } => "new".bright_green(),
        FeedUpdate::Advanced { .. } => "   ".normal(),
        FeedUpdate::Regressed { .. } => "rev".yellow(),
    };
    let flag = if view.consistency.is_consistent() {
        String::new()
    } else {
        format!("  {}", "⚠ inconsistent".yellow())
    };

    println!(
        "  {} {:<10} {} {:>6.2}%  {:<11} {}/{}{}",
        tag,
        view.round_id.to_string().bright_white(),
        view.progress_bar(20),
        view.percent,
        view.phase.label(),
        view.current_block,
        view.total_blocks,
        flag
    );
}

/// Print the phase windows of a schedule
pub fn schedule(schedule: &PhaseSchedule) {
    section("Phase Schedule");

    for window in schedule.windows() {
        println!(
            "  {:<12} [{:>6}, {:<6})  {} blocks",
            window.label.bright_white(),
            window.start,
            window.end,
            window.len().to_string().bright_cyan()
        );
    }
    println!();
    kv("Total blocks", &schedule.total_blocks().to_string());
}
