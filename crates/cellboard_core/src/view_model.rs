use serde_json::Value;

use crate::AsyncState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CounterView {
    /// Storage has not been read yet.
    #[default]
    Loading,
    Ready(u64),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub list: Vec<String>,
    pub draft: String,
    pub todo: AsyncState<Value>,
    pub counter: CounterView,
    pub spinner_frame: u64,
    pub dirty: bool,
}

impl AppViewModel {
    /// Persist gate: nothing but a loading indicator is shown until the
    /// counter has been restored.
    pub fn is_gated(&self) -> bool {
        self.counter == CounterView::Loading
    }
}
