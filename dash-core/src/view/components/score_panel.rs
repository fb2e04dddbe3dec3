//! Safety score gauge, category breakdown and recent trips.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
};

use crate::model::dashboard::{RECENT_TRIPS, SAFETY_SCORE, SCORE_BREAKDOWN, ScoreCategory};
use crate::view::theme::{ColorToken, ThemeProvider};

pub struct ScorePanel;

impl ScorePanel {
    pub fn new() -> Self {
        Self
    }

    pub fn render_score(&self, frame: &mut Frame<'_>, area: Rect, theme: &dyn ThemeProvider) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Safety Score ")
                    .border_style(theme.style(ColorToken::Primary)),
            )
            .gauge_style(
                Style::default()
                    .fg(theme.color(ColorToken::Primary))
                    .bg(theme.color(ColorToken::Card)),
            )
            .percent(u16::from(SAFETY_SCORE))
            .label(format!("{SAFETY_SCORE} / 100"));
        frame.render_widget(gauge, area);
    }

    /// Two-by-two grid of category gauges.
    pub fn render_breakdown(&self, frame: &mut Frame<'_>, area: Rect, theme: &dyn ThemeProvider) {
        let rows = Layout::vertical([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(area);

        for (row, pair) in rows.iter().zip(SCORE_BREAKDOWN.chunks(2)) {
            let cells =
                Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).split(*row);
            for (cell, category) in cells.iter().zip(pair) {
                frame.render_widget(category_gauge(category, theme), *cell);
            }
        }
    }

    pub fn render_trips(&self, frame: &mut Frame<'_>, area: Rect, theme: &dyn ThemeProvider) {
        let items: Vec<ListItem<'_>> = RECENT_TRIPS
            .iter()
            .map(|trip| {
                ListItem::new(Line::from(vec![
                    Span::styled("● ", theme.style(trip.rating.color())),
                    Span::styled(
                        trip.location,
                        theme.style(ColorToken::Text).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {} min · {}", trip.duration_min, trip.events_label()),
                        theme.style(ColorToken::Muted),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Trips ")
                .border_style(theme.style(ColorToken::Muted)),
        );
        frame.render_widget(list, area);
    }
}

impl Default for ScorePanel {
    fn default() -> Self {
        Self::new()
    }
}

fn category_gauge<'a>(category: &ScoreCategory, theme: &dyn ThemeProvider) -> Gauge<'a> {
    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", category.title))
                .border_style(theme.style(category.color)),
        )
        .gauge_style(
            Style::default()
                .fg(theme.color(category.color))
                .bg(theme.color(ColorToken::Card)),
        )
        .percent(u16::from(category.score))
        .label(category.score.to_string())
}
