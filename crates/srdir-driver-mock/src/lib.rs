//! Mock acquisition device for srdir.
//!
//! Simulates a mixed-signal device without hardware: a bank of logic
//! channels driven by a binary counter and analog channels carrying noisy
//! sines. A run is consumed as an iterator of datafeed packets:
//!
//! ```rust
//! use srdir_driver_mock::{MockDevice, MockDeviceConfig};
//!
//! let device = MockDevice::new(MockDeviceConfig {
//!     samples: 1_000,
//!     seed: Some(42),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let packets: Vec<_> = device.acquire().collect();
//! assert_eq!(packets.first().map(|p| p.kind()), Some("meta"));
//! assert_eq!(packets.last().map(|p| p.kind()), Some("end"));
//! ```

pub mod device;
pub mod pattern;
pub mod rng;
pub mod stream;

pub use device::{MockDevice, MockDeviceConfig};
pub use rng::MockRng;
pub use stream::PacketStream;
