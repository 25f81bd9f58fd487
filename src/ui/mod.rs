use crate::app::App;
use crate::automation::AutomationRunner;
use crate::catalog::Catalog;
use crate::client::{ClientSurface, Depot};
use crate::config::Config;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub mod log_view;
pub mod status_view;
pub mod wishlist_view;

pub fn render(
    frame: &mut Frame,
    app: &App,
    runner: &AutomationRunner,
    depot: &Depot,
    config: &Config,
    catalog: &Catalog,
) {
    let size = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    render_header(frame, layout[0], runner, depot);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(layout[1]);

    status_view::render(frame, columns[0], runner, depot, config);
    wishlist_view::render(frame, columns[1], app, depot, config, catalog);
    log_view::render(frame, columns[2], runner);

    render_footer(frame, layout[2]);
}

fn render_header(frame: &mut Frame, area: Rect, runner: &AutomationRunner, depot: &Depot) {
    let automation = if runner.is_enabled() {
        Span::styled("Running", Style::default().fg(Color::Green))
    } else {
        Span::styled("Off", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                "Quartermaster",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  Scrip: "),
            Span::styled(
                format!("{}", depot.scrip_balance()),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw("  •  Automation: "),
            automation,
        ]),
        Line::from(vec![Span::raw(
            "Space toggles the supply run; the wish list is edited in place.",
        )]),
    ];

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let instructions = Paragraph::new(Line::from(vec![
        Span::raw("Hotkeys: "),
        Span::styled("[Space]", Style::default().fg(Color::Yellow)),
        Span::raw(" run/stop  •  "),
        Span::styled("[J/K]", Style::default().fg(Color::Yellow)),
        Span::raw(" select  •  "),
        Span::styled("[E]", Style::default().fg(Color::Yellow)),
        Span::raw(" enable entry  •  "),
        Span::styled("[+/-]", Style::default().fg(Color::Yellow)),
        Span::raw(" limit  •  "),
        Span::styled("[M]", Style::default().fg(Color::Yellow)),
        Span::raw(" mode  •  "),
        Span::styled("[S]", Style::default().fg(Color::Yellow)),
        Span::raw(" warehouse stock  •  "),
        Span::styled("[C]", Style::default().fg(Color::Yellow)),
        Span::raw(" report channel  •  "),
        Span::styled("[A/H/B]", Style::default().fg(Color::Yellow)),
        Span::raw(" area/realm/bonus  •  "),
        Span::styled("[Q]", Style::default().fg(Color::Yellow)),
        Span::raw(" save & quit"),
    ]))
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(instructions, area);
}
