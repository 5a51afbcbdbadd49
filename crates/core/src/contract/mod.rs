//! Contract types shared by every layer
//!
//! - `timestamp`: microsecond cell timestamps
//! - `cell`: a timestamped value and its newest-first version history
//!
//! ```
//! use rowstore_core::contract::{Cell, CellHistory, Timestamp};
//!
//! let history = CellHistory::new(vec![
//!     Cell::new("1100", Timestamp::from_micros(2)),
//!     Cell::new("750", Timestamp::from_micros(1)),
//! ])
//! .unwrap();
//! assert_eq!(history.value(), "1100");
//! ```

pub mod cell;
pub mod timestamp;

pub use cell::{Cell, CellHistory};
pub use timestamp::Timestamp;
