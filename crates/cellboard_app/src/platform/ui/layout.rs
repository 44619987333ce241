use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub jotai_title: Rect,
    pub list: Rect,
    pub input: Rect,
    pub todo: Rect,
    pub zustand_title: Rect,
    pub counter: Rect,
    pub help: Rect,
}

pub fn regions(area: Rect) -> Regions {
    let [jotai_title, list, input, todo, zustand_title, counter, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .areas(area);

    Regions {
        jotai_title,
        list,
        input,
        todo,
        zustand_title,
        counter,
        help,
    }
}

/// A `width` x `height` rectangle centered in `area`, clipped to it.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
