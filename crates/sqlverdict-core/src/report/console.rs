use crate::stats::RunStatistics;
use std::fmt::Write;

fn pct(n: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 * 100.0 / total as f64
    }
}

pub fn render_summary(stats: &RunStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Judged {} items", stats.total);
    let _ = writeln!(
        out,
        "Correct: {} ({:.2}%)  Incorrect: {}",
        stats.correct,
        stats.accuracy() * 100.0,
        stats.incorrect()
    );
    if stats.spj_cases > 0 {
        let _ = writeln!(
            out,
            "Special judge: {} cases, {} accepted, {} rejected",
            stats.spj_cases, stats.spj_correct, stats.spj_incorrect
        );
    }
    let _ = writeln!(out, "----------------------------------------");
    for (category, count) in &stats.ranked {
        let _ = writeln!(
            out,
            "{:<28} {:>6}  {:>6.2}%",
            category.display_name(),
            count,
            pct(*count, stats.total)
        );
    }
    out
}

pub fn print_summary(stats: &RunStatistics) {
    eprintln!("\n{}", render_summary(stats));
}
