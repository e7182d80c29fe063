//! Event geometry within a single day column.

mod horizontal;
mod vertical;

pub use horizontal::{HorizontalLayout, PlacedEvent, calculate_horizontal_layout, sort_for_layout};
pub use vertical::{VerticalPosition, calculate_event_position};
