use crate::report::Comparison;
use crate::results::TestResult;

const RULE_WIDTH: usize = 80;

/// Round and group thousands with commas: `1234567.4` -> `1,234,567`
pub fn format_number(num: f64) -> String {
    if !num.is_finite() {
        return num.to_string();
    }

    let rounded = num.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if rounded < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Numbered block for one category of results
pub fn render_results(category: &str, results: &[TestResult]) -> String {
    let rule = "─".repeat(RULE_WIDTH);
    let mut out = format!("\n{} Benchmark Results:\n{}\n", category, rule);

    for (index, result) in results.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", index + 1, result.name));
        match &result.error {
            Some(error) => out.push_str(&format!("   ✗ Error: {}\n", error)),
            None => {
                out.push_str(&format!("   ✓ Operations/sec: {}\n", format_number(result.ops_per_sec)));
                out.push_str(&format!(
                    "   ± {:.2}% ({:.8}s deviation)\n",
                    result.stats.margin, result.stats.deviation
                ));
            }
        }
    }

    out.push_str(&format!("\n{}\n", rule));
    out
}

/// Print one category of results to stdout
pub fn format_results(category: &str, results: &[TestResult]) {
    print!("{}", render_results(category, results));
}

pub fn render_comparison(comparison: &Comparison) -> String {
    let mut out = format!("Comparing {} -> {}\n", comparison.timestamp1, comparison.timestamp2);

    for (category, differences) in &comparison.differences {
        out.push_str(&format!("\n{}:\n", category));
        for diff in differences {
            let change = match diff.percent_change {
                Some(pct) => format!("{:+.2}%", pct),
                None => "n/a".to_string(),
            };
            out.push_str(&format!(
                "  {:<50} {:>14} -> {:>14}  {}\n",
                diff.name,
                format_number(diff.ops_per_sec1),
                format_number(diff.ops_per_sec2),
                change
            ));
        }
    }
    out
}
