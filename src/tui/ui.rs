use crate::fetch::DataSource;
use crate::output::{format_divisions_line, format_score, truncate_text};
use crate::tui::app::{App, InputMode};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Wrap};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let banner_height = if app.notice().is_some() { 1 } else { 0 };

    // Layout: Title(1) + Banner(0|1) + Table(fill) + Divisions(1) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),             // Title bar
        Constraint::Length(banner_height), // Notice banner
        Constraint::Fill(1),               // Leaderboard
        Constraint::Length(1),             // Divisions footer
        Constraint::Length(1),             // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    if banner_height > 0 {
        render_notice_banner(frame, chunks[1], app);
    }
    render_table(frame, chunks[2], app);
    render_divisions(frame, chunks[3], app);
    render_status_bar(frame, chunks[4], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }

    // Loading overlay appears on top of everything
    if app.is_loading {
        render_loading_overlay(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let left = "topout";
    let heading = app.filters.heading();

    let mut spans = vec![
        Span::styled(left, Style::default().fg(colors.title_color).bold()),
        Span::raw("  "),
        Span::styled(heading.clone(), Style::default().fg(colors.filter_color).bold()),
    ];

    let scoring = format!(
        "best {} climbs, onsight +{}",
        app.scoring.top_climbs(),
        app.scoring.onsight_bonus()
    );
    let used = left.len() + 2 + heading.chars().count();
    let padding_len = (area.width as usize).saturating_sub(used + scoring.len());
    if padding_len > 0 {
        spans.push(Span::raw(" ".repeat(padding_len)));
        spans.push(Span::styled(scoring, Style::default().fg(colors.muted)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_notice_banner(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let notice = app.notice().unwrap_or_default();
    let banner = Paragraph::new(format!(" ! {}", notice))
        .style(Style::default().bg(colors.banner_bg).fg(colors.banner_fg).bold());
    frame.render_widget(banner, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.results.is_empty() {
        let msg = if app.dataset.is_none() {
            String::new()
        } else {
            app.filters.empty_message()
        };
        let empty_msg = Paragraph::new(msg)
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.colors.muted))
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let colors = app.colors.clone();
    let climbs_width = (area.width as usize).saturating_sub(4 + 24 + 9 + 7 + 8).max(10);

    let rows: Vec<Row> = app
        .results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let rank_style = match colors.rank_color(idx) {
                Some(color) => Style::default().fg(color).bold(),
                None => Style::default().fg(colors.index_color),
            };

            // Onsight climbs are highlighted in the scored list
            let scored = truncate_text(&result.scored_climbs, climbs_width);
            let climb_spans: Vec<Span> = scored
                .split(", ")
                .enumerate()
                .flat_map(|(i, part)| {
                    let style = if part.ends_with('*') {
                        Style::default().fg(colors.onsight_color)
                    } else {
                        Style::default()
                    };
                    let sep = if i > 0 { Some(Span::raw(", ")) } else { None };
                    sep.into_iter().chain(std::iter::once(Span::styled(part.to_string(), style)))
                })
                .collect();

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(rank_style),
                Cell::from(result.climber_name.clone()),
                Cell::from(Line::from(format_score(result.score)).alignment(Alignment::Right))
                    .style(Style::default().bold()),
                Cell::from(Line::from(result.num_climbs.to_string()).alignment(Alignment::Right)),
                Cell::from(Line::from(climb_spans)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Rank: "99."
        Constraint::Length(24), // Climber
        Constraint::Length(9),  // Score: "4000.1"
        Constraint::Length(7),  // Climbs
        Constraint::Fill(1),    // Scored climbs
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                Cell::from("#"),
                Cell::from("Climber"),
                Cell::from(Line::from("Score").alignment(Alignment::Right)),
                Cell::from(Line::from("Climbs").alignment(Alignment::Right)),
                Cell::from("Scored Climbs"),
            ])
            .style(colors.header_style)
            .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn render_divisions(frame: &mut Frame, area: Rect, app: &App) {
    let divisions = app.divisions();
    if divisions.is_empty() {
        return;
    }
    let line = truncate_text(&format_divisions_line(divisions), area.width as usize);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(app.colors.muted)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Refresh failed") {
            colors.flash_error
        } else if msg.starts_with("Refreshed") || msg.starts_with("Mock data loaded") {
            colors.flash_success
        } else {
            colors.status_key_color
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let count = format!("{} climbers", app.results.len());

        let source = match app.source() {
            Some(DataSource::Live) => "live",
            Some(DataSource::Mock) => "mock",
            None => "no data",
        };

        let elapsed = app.last_refresh.elapsed();
        let refresh_time = if elapsed.as_secs() < 60 {
            format!("refreshed {}s ago", elapsed.as_secs())
        } else {
            format!("refreshed {}m ago", elapsed.as_secs() / 60)
        };

        let mut hints = vec![
            ("j/k", ":nav "),
            ("g", ":gender "),
            ("c", ":category "),
            ("x", ":clear "),
        ];
        // Refresh is refused while the user is on mock data
        if !app.use_mock {
            hints.push(("r", ":refresh "));
        }
        if app.mock_toggle {
            hints.push(("m", ":mock "));
        }
        hints.push(("?", ":help "));
        hints.push(("q", ":quit"));

        let mut spans = vec![
            Span::styled(count, Style::default().fg(colors.muted)),
            Span::raw(" "),
            Span::styled(source, Style::default().fg(colors.muted)),
            Span::raw(" "),
            Span::styled(refresh_time, Style::default().fg(colors.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(colors.status_key_color)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let colors = &app.colors;
    let popup_area = centered_rect_fixed(52, 16, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .border_style(Style::default().fg(colors.popup_border))
        .style(Style::default().bg(colors.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(colors.status_key_color).bold();
    let mut entries = vec![
        ("j / Down      ", "Move down"),
        ("k / Up        ", "Move up"),
        ("g             ", "Cycle gender filter"),
        ("c             ", "Cycle category filter"),
        ("x             ", "Clear filters"),
        ("r             ", "Refresh results"),
    ];
    if app.mock_toggle {
        entries.push(("m             ", "Toggle mock data"));
    }
    entries.push(("?             ", "Show/hide this help"));
    entries.push(("q / Ctrl-c    ", "Quit"));

    let mut help_lines: Vec<Line> = entries
        .into_iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(key, key_style), Span::raw(desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Scores sum each climber's best sends; * marks an onsight.",
        Style::default().fg(colors.muted),
    )));
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines).wrap(Wrap { trim: true }), inner);
}

fn render_loading_overlay(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(30, 3, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered().border_style(Style::default().fg(app.colors.popup_border));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    // Braille spinner animation
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[app.spinner_frame % spinner_chars.len()];

    let text = if app.dataset.is_none() {
        format!("{} Loading results...", spinner)
    } else {
        format!("{} Refreshing...", spinner)
    };

    let loading_text = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(app.colors.title_color));

    frame.render_widget(loading_text, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Dataset;
    use crate::scoring::ScoringConfig;
    use crate::standings::Filters;
    use crate::tui::theme::ThemeColors;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app_with(dataset: Dataset) -> App {
        let mut app = App::new_loading(
            ScoringConfig::default(),
            Filters::none(),
            false,
            0,
            ThemeColors::dark(),
        );
        app.update_dataset(dataset);
        app.is_loading = false;
        app.flash_message = None;
        app
    }

    #[test]
    fn test_draw_leaderboard() {
        let mut app = app_with(crate::fetch::mock_dataset());
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("All Results"));
        assert!(screen.contains("Scored Climbs"));
        assert!(screen.contains("Available divisions:"));
        assert!(screen.contains("mock"));
    }

    #[test]
    fn test_draw_notice_banner() {
        let dataset = crate::fetch::mock_dataset().with_notice(crate::fetch::FALLBACK_NOTICE);
        let mut app = app_with(dataset);
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("Live data unavailable"));
    }

    #[test]
    fn test_draw_empty_filter_message() {
        let mut app = app_with(crate::fetch::mock_dataset());
        app.filters = Filters::new(Some("nobody"), None);
        app.recompute();
        let screen = render(&mut app, 100, 30);
        assert!(screen.contains("No results found for NOBODY climbers."));
    }

    #[test]
    fn test_status_bar_refresh_hint_follows_data_source() {
        let mut app = app_with(crate::fetch::mock_dataset());
        app.mock_toggle = true;
        let screen = render(&mut app, 160, 30);
        assert!(screen.contains("r:refresh"));
        assert!(screen.contains("m:mock"));

        app.use_mock = true;
        let screen = render(&mut app, 160, 30);
        assert!(!screen.contains("r:refresh"));
        assert!(screen.contains("m:mock"));
    }

    #[test]
    fn test_draw_too_small() {
        let mut app = app_with(crate::fetch::mock_dataset());
        let screen = render(&mut app, 20, 5);
        assert!(screen.contains("Terminal too"));
    }

    #[test]
    fn test_draw_loading_overlay() {
        let mut app = App::new_loading(
            ScoringConfig::default(),
            Filters::none(),
            false,
            0,
            ThemeColors::dark(),
        );
        let screen = render(&mut app, 80, 20);
        assert!(screen.contains("Loading results..."));
    }
}
