//! Terminal output utilities: ANSI notes, the progress bar, and analysis
//! rendering.

use std::io::Write;

use legalens_core::{AnalysisOutcome, ExtractionKind};

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

const BAR_WIDTH: usize = 30;

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM").map(|t| t != "dumb").unwrap_or(false))
}

fn paint(style: &str, text: &str) -> String {
    if supports_color() {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

/// Print a formatted WARNING note to stderr.
pub fn note_warn(msg: &str) {
    if supports_color() {
        eprintln!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        eprintln!("WARN: {msg}");
    }
}

/// Print a formatted ERROR note to stderr.
pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

/// Print a formatted SUCCESS note.
pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// `[#########.....................]  30%`
pub fn render_progress(percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        percent
    )
}

/// Overwrite the current stderr line with the progress bar.
pub fn write_progress(writer: &mut impl Write, percent: u8) -> std::io::Result<()> {
    write!(writer, "\r{}", render_progress(percent))?;
    if percent >= 100 {
        writeln!(writer)?;
    }
    writer.flush()
}

/// Human-readable rendering of an analysis.
pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    let mut out = String::new();

    out.push_str(&paint(BOLD, "Summary"));
    out.push('\n');
    out.push_str(&outcome.analysis.summary);
    out.push_str("\n\n");

    out.push_str(&paint(BOLD, "Key legal terms"));
    out.push('\n');
    for phrase in &outcome.analysis.key_points {
        out.push_str(&format!("  {} {phrase}\n", paint(CYAN, "•")));
    }
    out.push('\n');

    out.push_str(&paint(BOLD, "Potential issues"));
    out.push('\n');
    for issue in &outcome.analysis.potential_issues {
        out.push_str(&format!("  {} {issue}\n", paint(YELLOW, "!")));
    }

    if outcome.extraction != ExtractionKind::Success {
        out.push('\n');
        out.push_str(&paint(DIM, &format!("(extraction: {})", outcome.extraction)));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalens_core::AnalysisResult;

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(render_progress(0), format!("[{}]   0%", ".".repeat(30)));
        assert_eq!(render_progress(50), format!("[{}{}]  50%", "#".repeat(15), ".".repeat(15)));
        assert_eq!(render_progress(100), format!("[{}] 100%", "#".repeat(30)));
        assert_eq!(render_progress(250), render_progress(100));
    }

    #[test]
    fn final_progress_ends_the_line() {
        let mut buf = Vec::new();
        write_progress(&mut buf, 40).unwrap();
        write_progress(&mut buf, 100).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with('\r'));
        assert!(text.ends_with("100%\n"));
    }

    #[test]
    fn renders_sections() {
        let outcome = AnalysisOutcome {
            text: "x".into(),
            analysis: AnalysisResult {
                summary: "A short lease.".into(),
                key_points: vec!["lease".into()],
                potential_issues: vec!["No obvious issues identified".into()],
            },
            extraction: ExtractionKind::QualityFallback,
        };
        let rendered = render_outcome(&outcome);
        assert!(rendered.contains("A short lease."));
        assert!(rendered.contains("lease"));
        assert!(rendered.contains("No obvious issues identified"));
        assert!(rendered.contains("quality_fallback"));
    }
}
