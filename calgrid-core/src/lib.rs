//! Layout engine for the calgrid calendar.
//!
//! Turns stored events into positioned boxes on a day or week grid:
//! - `layout` computes vertical (`top`/`height`) and horizontal
//!   (`left`/`width`) placement within one day
//! - `filter` buckets events into display-zone calendar days
//! - `grid` ties both together for a view mode and current date
//!
//! Every entry point takes a [`LayoutConfig`] and returns a [`LayoutResult`];
//! nothing here panics on bad input or holds state between calls.

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod filter;
pub mod grid;
pub mod layout;
pub mod time;
pub mod week;

pub use config::LayoutConfig;
pub use error::{LayoutError, LayoutResult};
pub use event::{Event, EventId};
pub use grid::{DayLane, GridLayout, LaneContent, RenderBox, RenderedEvent, lay_out_grid};
pub use week::ViewMode;
