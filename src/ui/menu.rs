use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::config::Theme;
use crate::game::DeathReason;

/// Figures shown on the game-over popup.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverSummary {
    pub score: u32,
    pub high_score: u32,
    pub death_reason: Option<DeathReason>,
    pub is_new_high_score: bool,
}

/// Draws the ready screen as a centered popup.
pub fn render_ready_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32, theme: &Theme) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("READY TO PLAY?").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Arrows/WASD or click to turn"),
    ];
    if high_score > 0 {
        lines.push(Line::from(format!("Best: {high_score}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[Enter]/[Space] Start").style(Style::default().fg(theme.menu_footer)));
    lines.push(Line::from("[Q]/[Esc] Quit").style(Style::default().fg(theme.menu_footer)));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" snake ")),
        popup,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    summary: GameOverSummary,
    theme: &Theme,
) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.menu_alert)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Final score: {}", summary.score)),
        Line::from(format!("Best: {}", summary.high_score.max(summary.score))),
        Line::from(death_reason_text(summary.death_reason)),
        Line::from(if summary.is_new_high_score {
            "New high score!"
        } else {
            ""
        })
        .style(Style::default().fg(theme.hud_best)),
        Line::from(""),
        Line::from("[Enter]/[Space] Continue").style(Style::default().fg(theme.menu_footer)),
        Line::from("[Q]/[Esc] Quit").style(Style::default().fg(theme.menu_footer)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn death_reason_text(reason: Option<DeathReason>) -> &'static str {
    match reason {
        Some(DeathReason::Wall) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        None => "",
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use super::{centered_popup, death_reason_text};
    use crate::game::DeathReason;

    #[test]
    fn popup_stays_inside_area() {
        let area = Rect::new(0, 0, 42, 22);
        let popup = centered_popup(area, 80, 60);

        assert!(popup.x >= area.x && popup.right() <= area.right());
        assert!(popup.y >= area.y && popup.bottom() <= area.bottom());
    }

    #[test]
    fn death_reasons_have_distinct_text() {
        assert_eq!(death_reason_text(Some(DeathReason::Wall)), "Cause: hit wall");
        assert_ne!(
            death_reason_text(Some(DeathReason::Wall)),
            death_reason_text(Some(DeathReason::SelfCollision))
        );
        assert_eq!(death_reason_text(None), "");
    }
}
