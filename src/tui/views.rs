//! TUI rendering
//!
//! Pure render functions - all state lives in AppState, all drawing
//! happens here. Nothing in this module mutates state beyond scroll
//! bookkeeping.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{ActivityCard, AppState, FormField, InteractionMode, View};

/// Color palette
pub mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(186, 104, 200);
    pub const TITLE: Color = Color::Rgb(224, 170, 255);
    pub const TEXT: Color = Color::Rgb(220, 220, 220);
    pub const DIM: Color = Color::Rgb(128, 128, 128);
    pub const SELECTED: Color = Color::Rgb(255, 213, 128);
    pub const ERROR: Color = Color::Rgb(239, 83, 80);
    pub const WARN: Color = Color::Rgb(255, 183, 77);
    pub const OK: Color = Color::Rgb(129, 199, 132);
}

/// Spinner frames for the generating indicator
const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Render the entire UI
pub fn render(state: &mut AppState, frame: &mut Frame, spinner_frame: usize) {
    trace!("render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0], spinner_frame);

    match state.current_view {
        View::Form => render_form(state, frame, chunks[1]),
        View::Itinerary => render_itinerary(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    if state.interaction_mode == InteractionMode::Help {
        render_help_overlay(frame);
    }
}

/// Render the header bar: app title, view name, status
fn render_header(state: &AppState, frame: &mut Frame, area: Rect, spinner_frame: usize) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::styled(
            " Perfect Date ",
            Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(colors::DIM)),
        Span::styled(state.current_view.display_name(), Style::default().fg(colors::TEXT)),
    ];

    if state.generating {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} Generating...", SPINNER[spinner_frame % SPINNER.len()]),
            Style::default().fg(colors::ACCENT),
        ));
    }

    if let Some(note) = &state.outcome_note {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(note.clone(), Style::default().fg(colors::WARN)));
    }

    if let Some(err) = &state.error_message {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(err.clone(), Style::default().fg(colors::ERROR)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::ACCENT)),
    );
    frame.render_widget(header, area);
}

/// Render the five-field input form
fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let mut lines = vec![Line::from(Span::styled(
        "Fill in the details to generate your perfect date plan",
        Style::default().fg(colors::DIM),
    ))];
    lines.push(Line::default());

    let editing = state.interaction_mode == InteractionMode::Editing;

    for (idx, field) in FormField::ALL.iter().enumerate() {
        let focused = idx == state.form.focused;
        let marker = if focused { "> " } else { "  " };

        let label_style = if focused {
            Style::default().fg(colors::SELECTED).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT)
        };

        let value = state.form.value(*field);
        let value_span = if value.is_empty() && *field != FormField::TimeOfDay {
            Span::styled(field.placeholder(), Style::default().fg(colors::DIM))
        } else if *field == FormField::TimeOfDay {
            Span::styled(
                format!("< {} >", value),
                Style::default().fg(if focused { colors::ACCENT } else { colors::TEXT }),
            )
        } else {
            Span::styled(value.to_string(), Style::default().fg(colors::TEXT))
        };

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(colors::SELECTED)),
            Span::styled(format!("{:<22}", field.label()), label_style),
            value_span,
        ];

        if focused && editing {
            spans.push(Span::styled("█", Style::default().fg(colors::ACCENT)));
        }

        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        if editing {
            "Type to edit, Enter to confirm, Esc to cancel"
        } else {
            "Enter to edit field, g to generate, ? for help"
        },
        Style::default().fg(colors::DIM),
    )));

    let form = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Plan Your Date ")
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(form, area);
}

/// Render the itinerary view: title + one card per activity
fn render_itinerary(state: &mut AppState, frame: &mut Frame, area: Rect) {
    trace!("render_itinerary: called");
    if state.cards.is_empty() {
        render_empty_message(frame, area, "No itinerary yet. Press g to generate one.");
        return;
    }

    let card_heights: Vec<u16> = state.cards.iter().map(card_height).collect();

    // Scroll so the selected card stays visible
    let selected = state.card_selection.selected_index.min(state.cards.len() - 1);
    let available = area.height.saturating_sub(2);
    let mut offset = state.card_selection.scroll_offset.min(selected);
    loop {
        let used: u16 = card_heights[offset..=selected].iter().sum();
        if used <= available || offset >= selected {
            break;
        }
        offset += 1;
    }
    state.card_selection.scroll_offset = offset;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            std::iter::once(Constraint::Length(2))
                .chain(card_heights[offset..].iter().map(|h| Constraint::Length(*h)))
                .chain(std::iter::once(Constraint::Min(0)))
                .collect::<Vec<_>>(),
        )
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        state.itinerary_title.clone(),
        Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    for (i, card) in state.cards.iter().enumerate().skip(offset) {
        let chunk_idx = 1 + (i - offset);
        if chunk_idx >= chunks.len() - 1 {
            break;
        }
        render_activity_card(card, i == selected, frame, chunks[chunk_idx]);
    }
}

/// Height of a card given its expanded panels
fn card_height(card: &ActivityCard) -> u16 {
    // Borders (2) + title line + time/location line + description line
    let mut height = 5u16;
    if card.weather_expanded {
        height += 1;
    }
    if card.transport_expanded {
        height += 1;
    }
    if card.tips_expanded {
        height += card.activity.tips.len().max(1) as u16;
    }
    height
}

/// Render a single activity card with its expansion panels
fn render_activity_card(card: &ActivityCard, selected: bool, frame: &mut Frame, area: Rect) {
    trace!(title = %card.activity.title, "render_activity_card: called");
    let activity = &card.activity;

    let border_style = if selected {
        Style::default().fg(colors::SELECTED)
    } else {
        Style::default().fg(colors::DIM)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            activity.title.clone(),
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("🕐 ", Style::default().fg(colors::DIM)),
            Span::styled(activity.time.clone(), Style::default().fg(colors::TEXT)),
            Span::styled("  📍 ", Style::default().fg(colors::DIM)),
            Span::styled(activity.location.clone(), Style::default().fg(colors::TEXT)),
        ]),
        Line::from(Span::styled(activity.description.clone(), Style::default().fg(colors::TEXT))),
    ];

    if card.weather_expanded {
        lines.push(Line::from(vec![
            Span::styled("Setting: ", Style::default().fg(colors::DIM)),
            Span::styled(
                format!("{} Activity", activity.weather),
                Style::default().fg(colors::OK),
            ),
        ]));
    }

    if card.transport_expanded {
        let mut spans = vec![Span::styled("Transport: ", Style::default().fg(colors::DIM))];
        for (i, mode) in activity.transport.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{}]", mode),
                Style::default().fg(colors::ACCENT),
            ));
        }
        lines.push(Line::from(spans));
    }

    if card.tips_expanded {
        for tip in &activity.tips {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::default().fg(colors::DIM)),
                Span::styled(tip.clone(), Style::default().fg(colors::TEXT)),
            ]));
        }
    }

    let panels = format!(
        " [w]eather{} [t]ransport{} t[i]ps{} ",
        expansion_marker(card.weather_expanded),
        expansion_marker(card.transport_expanded),
        expansion_marker(card.tips_expanded),
    );

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title_bottom(Line::from(Span::styled(panels, Style::default().fg(colors::DIM)))),
    );
    frame.render_widget(widget, area);
}

fn expansion_marker(expanded: bool) -> &'static str {
    if expanded { "▾" } else { "▸" }
}

/// Render a centered placeholder message
fn render_empty_message(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(colors::DIM))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

/// Render the footer keybind bar
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let binds: &[(&str, &str)] = match (state.current_view, state.interaction_mode) {
        (_, InteractionMode::Editing) => &[("Enter", "confirm"), ("Esc", "cancel"), ("Tab", "next field")],
        (View::Form, _) => &[
            ("↑/↓", "field"),
            ("Enter", "edit"),
            ("g", "generate"),
            ("v", "view plan"),
            ("?", "help"),
            ("q", "quit"),
        ],
        (View::Itinerary, _) => &[
            ("↑/↓", "card"),
            ("w/t/i", "toggle panels"),
            ("g", "regenerate"),
            ("e", "edit inputs"),
            ("q", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (i, (key, desc)) in binds.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            format!("[{}]", key),
            Style::default().fg(colors::SELECTED),
        ));
        spans.push(Span::styled(format!(" {}", desc), Style::default().fg(colors::DIM)));
    }

    let footer = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::DIM)),
    );
    frame.render_widget(footer, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame) {
    trace!("render_help_overlay: called");
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled(
            "Keybindings",
            Style::default().fg(colors::TITLE).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        help_line("↑/↓, j/k", "Move between fields / cards"),
        help_line("Enter", "Edit focused field (cycles Time of Day)"),
        help_line("←/→", "Cycle Time of Day"),
        help_line("g", "Generate itinerary from current inputs"),
        help_line("v", "Show the last generated itinerary"),
        Line::default(),
        help_line("w", "Toggle weather panel on selected card"),
        help_line("t", "Toggle transport panel on selected card"),
        help_line("i", "Toggle tips panel on selected card"),
        help_line("e / Esc", "Back to the input form"),
        Line::default(),
        help_line("?", "Toggle this help"),
        help_line("q / Ctrl+C", "Quit"),
    ];

    let help = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(colors::ACCENT)),
    );
    frame.render_widget(help, area);
}

fn help_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", key), Style::default().fg(colors::SELECTED)),
        Span::styled(desc.to_string(), Style::default().fg(colors::TEXT)),
    ])
}

/// Compute a centered rect using percentages of the available area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Activity, Weather};

    fn make_card() -> ActivityCard {
        ActivityCard::new(Activity {
            title: "Dinner".to_string(),
            time: "6:30 PM".to_string(),
            location: "London".to_string(),
            description: "Nice dinner".to_string(),
            weather: Weather::Indoor,
            transport: vec!["Bus".to_string()],
            tips: vec!["Book ahead".to_string(), "Dress up".to_string()],
        })
    }

    #[test]
    fn test_card_height_grows_with_panels() {
        let mut card = make_card();
        let base = card_height(&card);

        card.toggle_weather();
        assert_eq!(card_height(&card), base + 1);

        card.toggle_transport();
        assert_eq!(card_height(&card), base + 2);

        card.toggle_tips();
        assert_eq!(card_height(&card), base + 2 + card.activity.tips.len() as u16);
    }

    #[test]
    fn test_centered_rect_is_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(60, 70, area);
        assert!(rect.x >= area.x && rect.right() <= area.right());
        assert!(rect.y >= area.y && rect.bottom() <= area.bottom());
    }

    #[test]
    fn test_expansion_marker() {
        assert_eq!(expansion_marker(true), "▾");
        assert_eq!(expansion_marker(false), "▸");
    }
}
