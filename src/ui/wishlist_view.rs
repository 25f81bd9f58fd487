use crate::app::App;
use crate::catalog::{self, Catalog};
use crate::client::{ClientSurface, Depot};
use crate::config::Config;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    depot: &Depot,
    config: &Config,
    catalog: &Catalog,
) {
    let mut items: Vec<ListItem> = config
        .wish_list
        .iter()
        .map(|entry| {
            let item = catalog.entry(entry.item_id);
            let name = item.map_or("(unknown reward)", |item| item.name);
            let subgroup = item.map_or("Misc", |item| catalog::subgroup_name(item.subgroup));
            let marker = if entry.is_enabled() { "[x]" } else { "[ ]" };
            let name_style = if entry.is_enabled() {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let owned = depot.live_item_count(entry.item_id, entry.checks_secondary_stock());

            let line = Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(name.to_string(), name_style),
                Span::raw(format!("  | limit {}", entry.limit())),
            ]);
            let stock_note = if entry.checks_secondary_stock() {
                "incl. warehouse"
            } else {
                "bags only"
            };
            let detail = Line::from(vec![Span::raw(format!(
                "{subgroup} • {} • owned {owned} ({stock_note})",
                entry.mode().label()
            ))]);
            ListItem::new(vec![line, detail])
        })
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Line::from(vec![Span::raw(
            "Wish list is empty.",
        )])));
    }

    let list = List::new(items)
        .block(Block::default().title("Wish List").borders(Borders::ALL))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !config.wish_list.is_empty() {
        let selection = app.selected_entry.min(config.wish_list.len() - 1);
        state.select(Some(selection));
    }
    frame.render_stateful_widget(list, area, &mut state);
}
