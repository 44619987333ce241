use cellboard_core::{AppViewModel, CounterView};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use serde_json::Value;

use super::boundary::{error_boundary, suspense, RenderError};
use super::constants::*;
use super::layout::{centered, regions};

pub fn draw(frame: &mut Frame<'_>, view: &AppViewModel) {
    let area = frame.area();
    if view.is_gated() {
        draw_gate(frame, area, view.spinner_frame);
        return;
    }

    let r = regions(area);
    let heading = Style::default().add_modifier(Modifier::BOLD);

    frame.render_widget(Paragraph::new(TITLE_JOTAI).style(heading), r.jotai_title);

    let list = error_boundary(
        "list",
        || Ok(Paragraph::new(serde_json::to_string(&view.list)?)),
        || Paragraph::new(LIST_ERROR_TEXT),
    );
    frame.render_widget(list.wrap(Wrap { trim: false }), r.list);

    let input = Paragraph::new(view.draft.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(INPUT_TITLE),
    );
    frame.render_widget(input, r.input);

    let todo = error_boundary(
        "todo",
        || {
            suspense(
                &view.todo,
                || Paragraph::new(spinner_line(view.spinner_frame, "Fetching...")),
                render_json,
            )
        },
        || Paragraph::new(FETCH_ERROR_TEXT),
    );
    frame.render_widget(
        todo.wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(TODO_TITLE)),
        r.todo,
    );

    frame.render_widget(
        Paragraph::new(TITLE_ZUSTAND).style(heading),
        r.zustand_title,
    );

    let bears = match view.counter {
        CounterView::Ready(bears) => bears,
        CounterView::Loading => 0,
    };
    let counter = Paragraph::new(vec![
        Line::from(format!("{bears} bears around here ...")),
        Line::from(BEARS_BUTTON).style(Style::default().add_modifier(Modifier::REVERSED)),
    ])
    .block(Block::default().borders(Borders::TOP));
    frame.render_widget(counter, r.counter);

    frame.render_widget(Paragraph::new(HELP_TEXT), r.help);
}

/// Persist gate: only a loading indicator until storage has been read.
fn draw_gate(frame: &mut Frame<'_>, area: Rect, spinner_frame: u64) {
    let text = spinner_line(spinner_frame, "Loading...");
    let width = display_width(&text);
    frame.render_widget(Paragraph::new(text), centered(area, width, 1));
}

/// Display width of a line, saturating at `u16::MAX`.
fn display_width(line: &Line<'_>) -> u16 {
    u16::try_from(line.width()).unwrap_or(u16::MAX)
}

fn spinner_line(frame: u64, label: &str) -> Line<'static> {
    let glyph = SPINNER_FRAMES[(frame % SPINNER_FRAMES.len() as u64) as usize];
    Line::from(format!("{glyph} {label}"))
}

fn render_json(value: &Value) -> Result<Paragraph<'static>, RenderError> {
    let dump = serde_json::to_string(value)?;
    Ok(Paragraph::new(Text::raw(dump)))
}

#[cfg(test)]
mod tests {
    use cellboard_core::{fallback_payload, AsyncState};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::json;

    use super::*;

    fn render(view: &AppViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw(frame, view)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn ready_view() -> AppViewModel {
        AppViewModel {
            list: vec!["hello".into(), "world".into()],
            draft: "typing".into(),
            todo: AsyncState::Ready(json!({"id": 1})),
            counter: CounterView::Ready(3),
            spinner_frame: 0,
            dirty: false,
        }
    }

    #[test]
    fn gate_hides_everything_until_hydrated() {
        let view = AppViewModel {
            counter: CounterView::Loading,
            ..ready_view()
        };
        let screen = render(&view);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains(TITLE_JOTAI));
        assert!(!screen.contains("bears around here"));
    }

    #[test]
    fn oversized_line_width_saturates() {
        assert_eq!(display_width(&Line::from("Loading...")), 10);
        let huge = "x".repeat(usize::from(u16::MAX) + 10);
        assert_eq!(display_width(&Line::from(huge)), u16::MAX);
    }

    #[test]
    fn ready_view_shows_every_cell() {
        let screen = render(&ready_view());
        assert!(screen.contains(TITLE_JOTAI));
        assert!(screen.contains(r#"["hello","world"]"#));
        assert!(screen.contains("typing"));
        assert!(screen.contains(r#"{"id":1}"#));
        assert!(screen.contains(TITLE_ZUSTAND));
        assert!(screen.contains("3 bears around here ..."));
    }

    #[test]
    fn pending_fetch_shows_spinner() {
        let view = AppViewModel {
            todo: AsyncState::Pending,
            spinner_frame: 1,
            ..ready_view()
        };
        assert!(render(&view).contains("/ Fetching..."));
    }

    #[test]
    fn fallback_payload_is_rendered_as_normal_value() {
        let view = AppViewModel {
            todo: AsyncState::Ready(fallback_payload()),
            ..ready_view()
        };
        let screen = render(&view);
        assert!(screen.contains(r#"[{"message":"oops something went wrong"}]"#));
        assert!(!screen.contains(FETCH_ERROR_TEXT));
    }

    #[test]
    fn crashed_fetch_trips_the_error_boundary() {
        let view = AppViewModel {
            todo: AsyncState::Errored("task panicked".into()),
            ..ready_view()
        };
        let screen = render(&view);
        assert!(screen.contains(FETCH_ERROR_TEXT));
        // Sibling sections still render.
        assert!(screen.contains("3 bears around here ..."));
    }
}
