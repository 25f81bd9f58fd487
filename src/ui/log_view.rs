use crate::automation::AutomationRunner;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

pub fn render(frame: &mut Frame, area: Rect, runner: &AutomationRunner) {
    let mut items: Vec<ListItem> = runner
        .messages()
        .map(|message| ListItem::new(Line::from(vec![Span::raw(message.clone())])))
        .collect();

    if items.is_empty() {
        items.push(ListItem::new(Line::from(vec![Span::raw(
            "Nothing has happened yet.",
        )])));
    }

    let list = List::new(items)
        .block(Block::default().title("Activity").borders(Borders::ALL));
    frame.render_widget(list, area);
}
