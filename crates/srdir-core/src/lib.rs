//! # srdir core types
//!
//! Shared vocabulary of the srdir session archive writer:
//!
//! - **`channel`**: device channels and the [`ChannelLayout`] resolver that
//!   assigns archive numbers.
//! - **`datafeed`**: the [`Packet`] stream consumed by output writers.
//! - **`analog`**: analog sample encodings and conversion to `f32`.
//! - **`device`**: the [`DeviceInfo`] query interface.
//! - **`error`**: [`SrdirError`] and host status codes.
//! - **`limits`**: buffer budget and archive layout tokens.
//! - **`units`**: SI formatting of metadata values.

pub mod analog;
pub mod channel;
pub mod datafeed;
pub mod device;
pub mod error;
pub mod limits;
pub mod units;

pub use analog::{AnalogEncoding, Rational};
pub use channel::{Channel, ChannelLayout, ChannelType, NumberedChannel};
pub use datafeed::{Analog, ConfigEntry, Logic, Meta, Packet};
pub use device::{DeviceInfo, StaticDevice};
pub use error::{SrdirError, SrdirResult, StatusCode};
