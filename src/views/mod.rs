pub mod popover;
pub mod summary;

pub use popover::{DetailPopover, FocusedSeat};
pub use summary::{SummaryItem, SummaryView};
