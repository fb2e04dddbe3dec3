//! src/view/components/scan_button.rs
//!
//! The "Scan PIDs" button. Label, border color, disabled state and dimming
//! all come from the current [`ScanStatus`]; nothing here is stored.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use tracing::trace;

use crate::model::scan_status::ScanStatus;
use crate::view::theme::{ColorToken, ThemeProvider};

/// Everything the button shows for one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanButtonProps {
    pub label: &'static str,
    pub border: ColorToken,
    pub disabled: bool,
    pub dimmed: bool,
}

impl From<ScanStatus> for ScanButtonProps {
    fn from(status: ScanStatus) -> Self {
        Self {
            label: status.label(),
            border: status.color_token(),
            disabled: status.is_disabled(),
            dimmed: status.is_dimmed(),
        }
    }
}

pub struct ScanButton;

impl ScanButton {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame<'_>,
        area: Rect,
        status: ScanStatus,
        theme: &dyn ThemeProvider,
    ) {
        let props = ScanButtonProps::from(status);
        trace!(
            target: "dash_core::view::components::scan_button",
            status = %status,
            label = props.label,
            disabled = props.disabled,
            "Rendering scan button"
        );

        let mut text_style = Style::default()
            .fg(theme.color(ColorToken::Text))
            .bg(theme.color(ColorToken::Card))
            .add_modifier(Modifier::BOLD);
        let mut border_style = Style::default().fg(theme.color(props.border));
        if props.dimmed {
            text_style = text_style.add_modifier(Modifier::DIM);
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let hint = if props.disabled { "" } else { " [s] " };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_bottom(hint)
            .title_alignment(Alignment::Center);

        let button = Paragraph::new(props.label)
            .style(text_style)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(button, area);
    }
}

impl Default for ScanButton {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::theme::ThemeKind;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(status: ScanStatus) -> String {
        let mut terminal = Terminal::new(TestBackend::new(30, 3)).unwrap();
        let palette = ThemeKind::Dark.palette();
        terminal
            .draw(|frame| {
                let area = frame.area();
                ScanButton::new().render(frame, area, status, &palette);
            })
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
    fn props_follow_status() {
        assert_eq!(
            ScanButtonProps::from(ScanStatus::Scanning),
            ScanButtonProps {
                label: "Scanning…",
                border: ColorToken::Primary,
                disabled: true,
                dimmed: true,
            }
        );
        assert_eq!(
            ScanButtonProps::from(ScanStatus::Error).border,
            ColorToken::Error
        );
    }

    #[test]
    fn renders_label_for_each_status() {
        for status in [
            ScanStatus::Idle,
            ScanStatus::Scanning,
            ScanStatus::Success,
            ScanStatus::Error,
        ] {
            assert!(rendered(status).contains(status.label()), "{status}");
        }
    }

    #[test]
    fn key_hint_hidden_while_disabled() {
        assert!(rendered(ScanStatus::Idle).contains("[s]"));
        assert!(!rendered(ScanStatus::Scanning).contains("[s]"));
    }
}
