//! DTS6012M Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the decoder consumes. Board
//! support code implements them on top of a concrete UART peripheral and
//! timer, and host tests implement them with in-memory mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (dts-firmware, tests)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dts-core (sensor component)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dts-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`clock::Clock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod uart;

pub use clock::Clock;
pub use uart::{DataBits, Parity, StopBits, Uart, UartConfig, UartRx, UartTx};
