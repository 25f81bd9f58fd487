use crate::automation::accounting;
use crate::automation::AutomationRunner;
use crate::catalog;
use crate::client::{ClientSurface, Depot};
use crate::config::{Config, ReportChannel};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    runner: &AutomationRunner,
    depot: &Depot,
    config: &Config,
) {
    let rank = depot.rank();
    let ceiling = accounting::scrip_ceiling(rank);
    let reserved = accounting::effective_reserved_balance(config, rank);
    let rank_title = catalog::rank_info(rank).map_or("Unranked", |info| info.title);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("State: "),
            Span::styled(
                runner.stage().describe(),
                Style::default().fg(Color::Cyan),
            ),
        ]),
        Line::from(vec![Span::raw(format!(
            "Scrip: {} / {}  (reserved {})",
            depot.scrip_balance(),
            ceiling,
            reserved
        ))]),
        Line::from(vec![Span::raw(format!(
            "Rank: {rank_title}  •  Branch: {}",
            depot.unit().label()
        ))]),
        Line::from(vec![Span::raw(format!(
            "Deliveries waiting: {}",
            depot.intake_len()
        ))]),
    ];

    if let Some(info) = catalog::rank_info(rank) {
        if rank < catalog::MAX_RANK {
            lines.push(Line::from(vec![Span::raw(format!(
                "Promotion costs {} scrip",
                info.promotion_cost
            ))]));
        }
    }

    if depot.bonus_multiplier() > 1.0 {
        let percent = (depot.bonus_multiplier() - 1.0) * 100.0;
        lines.push(Line::from(vec![Span::styled(
            format!("Delivery bonus: +{percent:.0}%"),
            Style::default().fg(Color::Green),
        )]));
    } else {
        lines.push(Line::from(vec![Span::styled(
            "No delivery bonus active",
            Style::default().fg(Color::Red),
        )]));
    }

    if runner.is_enabled() || runner.delivered() > 0 {
        lines.push(Line::from(vec![Span::raw(format!(
            "Delivered this run: {}",
            runner.delivered()
        ))]));
    }

    if depot.auto_confirm_feature() == Some(false) {
        lines.push(Line::from(vec![Span::styled(
            "Host auto-confirm suspended for this run",
            Style::default().fg(Color::DarkGray),
        )]));
    }

    if let Some(error) = runner.fatal() {
        lines.push(Line::from(vec![Span::styled(
            format!("Error: {error}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]));
    } else if let Some(advisory) = runner.advisory() {
        lines.push(Line::from(vec![Span::styled(
            format!("Waiting: {advisory}"),
            Style::default().fg(Color::Yellow),
        )]));
    }

    if config.report_channel == ReportChannel::StatusLine {
        if let Some(report) = runner.last_report() {
            lines.push(Line::from(vec![Span::styled(
                report.to_string(),
                Style::default().fg(Color::Magenta),
            )]));
        }
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Supply Run").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
