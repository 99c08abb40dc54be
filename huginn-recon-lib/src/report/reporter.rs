use super::escape::escape_html;
use super::mode::ReportMode;
use crate::matching::MatchTally;

/// Maximum number of entries in a `besthitlist` report
pub const MAX_RANKED: usize = 10;

/// Where a report is going to be displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Surface {
    /// Listed labels escaped, lines broken with `<br>\n`
    #[default]
    Html,
    /// Labels verbatim, lines broken with `\n`
    Text,
}

impl Surface {
    fn line_break(self) -> &'static str {
        match self {
            Surface::Html => "<br>\n",
            Surface::Text => "\n",
        }
    }

    fn label(self, label: &str) -> String {
        match self {
            Surface::Html => escape_html(label),
            Surface::Text => label.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    surface: Surface,
}

impl Reporter {
    pub fn new(surface: Surface) -> Self {
        Self { surface }
    }

    pub fn render(&self, tally: &MatchTally, mode: ReportMode, possibilities: usize) -> String {
        match mode {
            ReportMode::BestHit => Self::best_hit(tally),
            ReportMode::BestHitDetail => self.best_hit_detail(tally, possibilities),
            ReportMode::List => self.list(tally),
            ReportMode::BestHitList => self.best_hit_list(tally, possibilities),
        }
    }

    /// Bare label on every surface; only the listings escape
    fn best_hit(tally: &MatchTally) -> String {
        tally
            .best_hit()
            .map(|(label, _)| label.to_string())
            .unwrap_or_default()
    }

    fn best_hit_detail(&self, tally: &MatchTally, possibilities: usize) -> String {
        let best_count = tally.best_hit().map(|(_, c)| c).unwrap_or(0);
        let accuracy = if possibilities > 0 {
            accuracy(best_count, possibilities)
        } else {
            100.0
        };
        format!(
            "{} ({}% with {} hits)",
            Self::best_hit(tally),
            format_percent(accuracy),
            best_count
        )
    }

    fn list(&self, tally: &MatchTally) -> String {
        let line_break = self.surface.line_break();
        tally
            .iter()
            .map(|(label, count)| format!("{}: {count}{line_break}", self.surface.label(label)))
            .collect()
    }

    /// Ranking over `"<count>;<label>"` strings sorted descending
    ///
    /// The sort is textual, so equal counts order by label descending and a
    /// count of 10 sorts below a count of 9. Compatible ranking depends on it.
    fn best_hit_list(&self, tally: &MatchTally, possibilities: usize) -> String {
        let best_count = tally.best_hit().map(|(_, c)| c).unwrap_or(0);
        let denominator = if possibilities > 0 { possibilities } else { best_count };

        let mut ranked: Vec<(String, usize, String)> = tally
            .iter()
            .map(|(label, count)| {
                let label = self.surface.label(label);
                (format!("{count};{label}"), count, label)
            })
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0));

        let line_break = self.surface.line_break();
        let mut out = String::new();
        for (i, (_, count, label)) in ranked.iter().take(MAX_RANKED).enumerate() {
            if *count == 0 {
                continue;
            }
            out.push_str(&format!(
                "{}. {label} ({}% with {count} hits)",
                i.saturating_add(1),
                format_percent(accuracy(*count, denominator))
            ));
            if i.saturating_add(1) < MAX_RANKED {
                out.push_str(line_break);
            }
        }
        out
    }
}

/// Render a report for a markup surface
pub fn render(tally: &MatchTally, mode: ReportMode, possibilities: usize) -> String {
    Reporter::new(Surface::Html).render(tally, mode, possibilities)
}

/// Percentage of `count` over `denominator`, rounded to two decimals
fn accuracy(count: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let raw = (100.0 / denominator as f64) * count as f64;
    (raw * 100.0).round() / 100.0
}

/// Shortest decimal form: `100`, `50`, `33.33`, `12.5`
fn format_percent(value: f64) -> String {
    format!("{value}")
}
