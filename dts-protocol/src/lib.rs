//! DTS6012M UART Protocol
//!
//! This crate implements the binary protocol spoken by the DTS6012M
//! distance sensor: frame layout, CRC-16 integrity check, measurement
//! extraction, and a streaming synchronizer that recovers frame alignment
//! from an unreliable byte stream.
//!
//! # Protocol Overview
//!
//! Inbound frames from the sensor:
//! ```text
//! ┌─────────────┬──────┬────────────┬─────────────┬──────────┐
//! │ HEADER      │ TYPE │ LENGTH     │ PAYLOAD     │ CRC-16   │
//! │ A5 03 20 01 │ 1B   │ 2B (BE)    │ 0–32B       │ 2B (BE)  │
//! └─────────────┴──────┴────────────┴─────────────┴──────────┘
//! ```
//!
//! The distance is a little-endian `u16` in millimeters at frame bytes
//! 13–14; `0xFFFF` means no target in range.
//!
//! The host starts continuous measurement with the fixed 9-byte
//! [`START_COMMAND`].

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod crc;
pub mod frame;
pub mod sync;

pub use buffer::{FrameBuffer, Overflow, BUFFER_CAPACITY};
pub use crc::crc16;
pub use frame::{
    decode, encode_frame, DecodeError, EncodeError, Measurement, FRAME_HEADER, MAX_PAYLOAD_SIZE,
    MIN_FRAME_LEN, START_COMMAND,
};
pub use sync::{FrameSynchronizer, SyncEvent, SyncState};
