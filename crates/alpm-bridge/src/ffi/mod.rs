//! Foreign layouts and marshaling
//!
//! - `types`: `#[repr(C)]` mirrors of the libalpm structs this crate reads
//! - `marshal`: C string and C boolean conversions
//!
//! # Safety
//!
//! Raw pointer reads are confined to this crate's view types. Every public
//! constructor taking a raw pointer is `unsafe` and documents what the
//! foreign owner must guarantee.

pub mod marshal;
pub mod types;

pub use marshal::{decode_flag, encode_flag};
pub use types::*;
