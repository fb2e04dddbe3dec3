//! src/view/ui.rs
//! ============================================================================
//! # UIRenderer: splash and dashboard layout
//!
//! Pure composition: reads `UIState` and the current scan status, draws a
//! frame, mutates nothing but its own layout cache.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tracing::trace;

use crate::model::scan_status::ScanStatus;
use crate::model::ui_state::{UIMode, UIState};
use crate::view::components::{BannerOverlay, ScanButton, ScorePanel};
use crate::view::theme::{ColorToken, ThemeProvider};

/// Header, score, breakdown, trips, button, footer
type DashboardRegions = [Rect; 6];

#[derive(Debug, Default)]
struct LayoutCache {
    area: Option<Rect>,
    regions: DashboardRegions,
    hit: u64,
}

pub struct UIRenderer {
    cache: LayoutCache,
    scan_button: ScanButton,
    score_panel: ScorePanel,
    banner: BannerOverlay,
}

impl UIRenderer {
    pub fn new() -> Self {
        Self {
            cache: LayoutCache::default(),
            scan_button: ScanButton::new(),
            score_panel: ScorePanel::new(),
            banner: BannerOverlay::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>, ui_state: &UIState, status: ScanStatus) {
        let palette = ui_state.theme.palette();
        let area = frame.area();

        frame.render_widget(
            Block::default().style(
                Style::default()
                    .bg(palette.color(ColorToken::Background))
                    .fg(palette.color(ColorToken::Text)),
            ),
            area,
        );

        match ui_state.mode {
            UIMode::Splash => self.render_splash(frame, area, &palette),
            UIMode::Dashboard => self.render_dashboard(frame, area, status, &palette),
        }

        if let Some(notification) = &ui_state.notification {
            self.banner.render(frame, notification, &palette, area);
        }

        ui_state.increment_frame();
    }

    fn render_splash(&self, frame: &mut Frame<'_>, area: Rect, theme: &dyn ThemeProvider) {
        let [_, body, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Fill(1),
        ])
        .areas(area);

        let text = vec![
            Line::from(Span::styled(
                "DRIVE DASH",
                theme.style(ColorToken::Primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Driving safety at a glance",
                theme.style(ColorToken::Muted),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press any key to continue",
                theme.style(ColorToken::Text).add_modifier(Modifier::ITALIC),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), body);
    }

    fn render_dashboard(
        &mut self,
        frame: &mut Frame<'_>,
        area: Rect,
        status: ScanStatus,
        theme: &dyn ThemeProvider,
    ) {
        let [header, score, breakdown, trips, button, footer] = self.update_layout_cache(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "Dashboard",
                theme.style(ColorToken::Text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [r] reset view", theme.style(ColorToken::Primary)),
        ]));
        frame.render_widget(title, header);

        self.score_panel.render_score(frame, score, theme);
        self.score_panel.render_breakdown(frame, breakdown, theme);
        self.score_panel.render_trips(frame, trips, theme);

        let [_, button_slot, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(24),
            Constraint::Fill(1),
        ])
        .areas(button);
        self.scan_button.render(frame, button_slot, status, theme);

        let help = Paragraph::new("s: scan  r: reset  t: theme  q: quit")
            .style(theme.style(ColorToken::Muted))
            .alignment(Alignment::Center);
        frame.render_widget(help, footer);
    }

    fn update_layout_cache(&mut self, area: Rect) -> DashboardRegions {
        if self.cache.area == Some(area) {
            self.cache.hit += 1;
            return self.cache.regions;
        }

        trace!(width = area.width, height = area.height, "Recomputing dashboard layout");
        self.cache.area = Some(area);
        self.cache.regions = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(area);
        self.cache.regions
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::theme::ThemeKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(renderer: &mut UIRenderer, ui: &UIState, status: ScanStatus) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| renderer.render(frame, ui, status))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn cache_hit() {
        let mut r = UIRenderer::new();
        r.update_layout_cache(Rect::new(0, 0, 100, 40));
        r.update_layout_cache(Rect::new(0, 0, 100, 40));
        assert_eq!(r.cache.hit, 1);
    }

    #[test]
    fn splash_then_dashboard() {
        let mut renderer = UIRenderer::new();
        let mut ui = UIState::new(ThemeKind::Dark);

        let splash = draw(&mut renderer, &ui, ScanStatus::Idle);
        assert!(splash.contains("DRIVE DASH"));
        assert!(!splash.contains("Scan PIDs"));

        ui.enter_dashboard();
        let dashboard = draw(&mut renderer, &ui, ScanStatus::Success);
        assert!(dashboard.contains("Safety Score"));
        assert!(dashboard.contains("Lake Drive"));
        assert!(dashboard.contains("Scan Complete!"));
    }

    #[test]
    fn banner_drawn_over_dashboard() {
        let mut renderer = UIRenderer::new();
        let mut ui = UIState::new(ThemeKind::Light);
        ui.enter_dashboard();
        ui.show_banner("Please configure protocol first", ColorToken::Error, Some(3000));

        let screen = draw(&mut renderer, &ui, ScanStatus::Error);
        assert!(screen.contains("Please configure protocol first"));
        assert!(screen.contains("Scan Failed"));
    }
}
