//! Record Module
//!
//! The decoded metadata attached to a subscriber number, and the two-byte
//! packing it is stored in.
//!
//! ## Packed Format
//! ```text
//!         b1                          b2
//! ┌───┬─────────────┬──────┐  ┌─────────────────────┬───┐
//! │ F │ Provider(5) │ Sub  │  │ Network bits 7..1   │ S │
//! │(1)│             │ (2)  │  │                     │(1)│
//! └───┴─────────────┴──────┘  └─────────────────────┴───┘
//! ```
//! - F: fill bit. Clear means "no data" for this slot.
//! - S: status flag, 0 = `D`, 1 = `A`.

mod codec;
mod types;

pub use codec::{decode, encode, FILL_BIT};
pub use types::{NetworkSet, Record, StatusFlag};
