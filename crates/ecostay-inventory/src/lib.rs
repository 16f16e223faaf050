//! Inventory adapter: queries the external hotel-inventory provider for a
//! location and stay window and lifts its response into [`RawListing`]s.
//!
//! The provider's response schema stays private to this crate; callers only
//! ever see [`RawListing`].
//!
//! [`RawListing`]: ecostay_core::RawListing

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::{HotelInventory, InventoryClient};
pub use error::InventoryError;
pub use normalize::normalize_hotel;
