pub const TITLE_JOTAI: &str = "Handling State with Jotai";
pub const TITLE_ZUSTAND: &str = "Handling State with Zustand";
pub const INPUT_TITLE: &str = "Add to List (Enter)";
pub const TODO_TITLE: &str = "Todo";
pub const FETCH_ERROR_TEXT: &str = "Error fetching Todos.";
pub const LIST_ERROR_TEXT: &str = "Error rendering list.";
pub const BEARS_BUTTON: &str = "Bears UP (Ctrl+B)";
pub const HELP_TEXT: &str = "Enter: add  Ctrl+B: bears up  Ctrl+X: remove all bears  Esc: quit";
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
