//! Cellboard core: observable cells, the pure update function and view-model helpers.
mod async_cell;
mod cell;
mod counter;
mod effect;
mod graph;
mod list;
mod msg;
mod state;
mod update;
mod view_model;

pub use async_cell::{
    fallback_payload, AsyncCell, AsyncState, FetchOutcome, RequestId, FALLBACK_MESSAGE,
};
pub use cell::{Cell, SubscriberId};
pub use counter::{Counter, CounterStore, Hydration};
pub use effect::Effect;
pub use graph::{CellKey, DependencyGraph, GraphError};
pub use list::{ListCell, LIST_SEED};
pub use msg::Msg;
pub use state::{AppState, DEFAULT_REQUEST_TARGET};
pub use update::update;
pub use view_model::{AppViewModel, CounterView};
