//! Column and card rendering.

use gabinete_model::{Column, Task};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{BoardLayout, ColumnSlot};
use super::theme;
use crate::app::{App, Mode};
use crate::store::Storage;

/// Render the four columns and their visible cards.
pub fn render<S: Storage>(frame: &mut Frame, app: &App<S>, layout: &BoardLayout) {
    for slot in layout.columns() {
        render_column(frame, app, slot);
    }
}

fn render_column<S: Storage>(frame: &mut Frame, app: &App<S>, slot: &ColumnSlot) {
    let column = slot.column;
    let tasks = app.board.tasks(column);

    let border_style = if app.drag.is_dragging() && app.carry_target == column {
        theme::dragging()
    } else if app.column == column {
        theme::highlighted()
    } else {
        theme::normal()
    };

    let mut block = Block::default()
        .title(format!(" {} ({}) ", column.label(), tasks.len()))
        .borders(Borders::ALL)
        .border_style(border_style);
    if slot.hidden_above > 0 {
        block = block.title_top(Line::from(format!("↑{}", slot.hidden_above)).right_aligned());
    }
    if slot.hidden_below > 0 {
        block = block.title_bottom(Line::from(format!("↓{}", slot.hidden_below)).right_aligned());
    }
    frame.render_widget(block, slot.area);

    for card in &slot.cards {
        if let Some(task) = tasks.get(card.index) {
            render_card(frame, app, column, card.index, task, card.area);
        }
    }
}

fn render_card<S: Storage>(
    frame: &mut Frame,
    app: &App<S>,
    column: Column,
    index: usize,
    task: &Task,
    area: Rect,
) {
    let selected = app.column == column && app.selected_row() == index;
    let dragged = app.drag.gesture().is_some_and(|g| g.id == task.id);
    let editing = match &app.mode {
        Mode::EditTitle { id, buffer, cursor, .. } if *id == task.id => Some((buffer, *cursor)),
        _ => None,
    };

    let border_style = if dragged {
        theme::dragging()
    } else if selected {
        theme::highlighted()
    } else {
        theme::card(&task.color)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(theme::card(&task.color));
    let inner = block.inner(area);

    let marker = if dragged { "⇅ " } else { "" };
    let title = editing.map_or(task.title.as_str(), |(buffer, _)| buffer.as_str());
    let lines = vec![
        Line::from(vec![
            Span::raw(marker),
            Span::styled(title.to_string(), theme::card_title(&task.color)),
        ]),
        Line::from(format!("{} · P{}", task.responsible, task.priority)),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);

    if let Some((_, cursor)) = editing {
        let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
        let x = inner
            .x
            .saturating_add(offset)
            .min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}
