use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::{GameSnapshot, SessionStats};

const SEPARATOR: &str = " │ ";

/// Values shown on the single HUD row.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct HudValues {
    pub score: u32,
    pub high_score: u32,
    pub length: usize,
    /// Coverage in tenths of a percent, so the struct stays `Eq`.
    pub coverage_permille: u32,
}

impl HudValues {
    #[must_use]
    pub fn from_state(snapshot: &GameSnapshot, stats: &SessionStats) -> Self {
        Self {
            score: snapshot.score,
            high_score: snapshot.high_score,
            length: stats.snake_length,
            coverage_permille: (stats.coverage_percent * 10.0).round() as u32,
        }
    }
}

/// Renders the HUD into `area` (expected to be one row tall).
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, values: HudValues, theme: &Theme) {
    let compact = full_width(values) > usize::from(area.width);

    frame.render_widget(
        Paragraph::new(hud_line(values, compact, theme)).alignment(Alignment::Center),
        area,
    );
}

fn labels(compact: bool) -> [&'static str; 4] {
    if compact {
        ["S", "B", "L", "C"]
    } else {
        ["Score", "Best", "Length", "Coverage"]
    }
}

fn hud_line(values: HudValues, compact: bool, theme: &Theme) -> Line<'static> {
    let [score_label, best_label, length_label, coverage_label] = labels(compact);
    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled(format!("{score_label}: "), label_style),
        Span::styled(values.score.to_string(), value_style),
    ];

    // The best score only appears once there is one.
    if values.high_score > 0 {
        spans.push(Span::raw(SEPARATOR));
        spans.push(Span::styled(format!("{best_label}: "), label_style));
        spans.push(Span::styled(
            values.high_score.to_string(),
            Style::default().fg(theme.hud_best),
        ));
    }

    spans.push(Span::raw(SEPARATOR));
    spans.push(Span::styled(format!("{length_label}: "), label_style));
    spans.push(Span::styled(values.length.to_string(), value_style));
    spans.push(Span::raw(SEPARATOR));
    spans.push(Span::styled(format!("{coverage_label}: "), label_style));
    spans.push(Span::styled(coverage_text(values.coverage_permille), value_style));

    Line::from(spans)
}

fn coverage_text(permille: u32) -> String {
    format!("{}.{}%", permille / 10, permille % 10)
}

fn full_width(values: HudValues) -> usize {
    hud_text(values, false).chars().count()
}

fn hud_text(values: HudValues, compact: bool) -> String {
    let [score_label, best_label, length_label, coverage_label] = labels(compact);
    let mut text = format!("{score_label}: {}", values.score);
    if values.high_score > 0 {
        text.push_str(&format!("{SEPARATOR}{best_label}: {}", values.high_score));
    }
    text.push_str(&format!(
        "{SEPARATOR}{length_label}: {}{SEPARATOR}{coverage_label}: {}",
        values.length,
        coverage_text(values.coverage_permille)
    ));
    text
}

#[cfg(test)]
mod tests {
    use super::{HudValues, hud_text};

    fn values(high_score: u32) -> HudValues {
        HudValues {
            score: 30,
            high_score,
            length: 4,
            coverage_permille: 10,
        }
    }

    #[test]
    fn best_score_is_hidden_until_positive() {
        assert!(!hud_text(values(0), false).contains("Best"));
        assert!(hud_text(values(20), false).contains("Best: 20"));
    }

    #[test]
    fn coverage_is_shown_with_one_decimal() {
        assert!(hud_text(values(0), false).ends_with("Coverage: 1.0%"));
    }

    #[test]
    fn compact_labels_are_shorter() {
        assert!(hud_text(values(20), true).len() < hud_text(values(20), false).len());
    }
}
