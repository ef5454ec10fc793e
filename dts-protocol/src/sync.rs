//! Stream synchronizer
//!
//! Turns an arbitrary-granularity byte stream into decoded measurements.
//! The synchronizer keeps no explicit state besides its buffer: each time
//! a byte arrives it re-derives where it stands from the buffered bytes.
//!
//! ```text
//!            ┌──────────── drop 1 byte ◄─────────────┐
//!            ▼                                        │ header mismatch,
//!   ┌─────────────────┐   header + length    ┌────────┴────────┐
//!   │     Hunting     ├─────────────────────►│   LengthKnown   │
//!   └─────────────────┘                      └────────┬────────┘
//!            ▲                                        │ full frame buffered
//!            │ drop frame (ok) / drop 1 (bad)  ┌──────▼──────────┐
//!            └─────────────────────────────────┤   FrameReady    │
//!                                              └─────────────────┘
//! ```
//!
//! Recovery from corruption always moves forward by exactly one byte, so a
//! misaligned stream converges on the next real header without the buffer
//! growing.

use crate::buffer::FrameBuffer;
use crate::frame::{
    decode, payload_len, DecodeError, Measurement, CRC_LEN, FRAME_HEADER, MAX_PAYLOAD_SIZE,
    PREAMBLE_LEN,
};

/// Something the synchronizer did while consuming input
///
/// Every event except [`SyncEvent::FrameDecoded`] is local and self-healing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncEvent {
    /// Buffer was full; everything buffered was discarded
    BufferOverflow { discarded: usize },
    /// Buffer did not start with the frame header; one byte dropped
    HeaderMismatch { dropped: u8 },
    /// Length field exceeds the link maximum; one byte dropped
    OversizedPayloadField { payload_len: u16 },
    /// Declared frame can never fit; buffer cleared
    FrameTooLargeForBuffer { total_len: usize },
    /// CRC did not match; one byte dropped
    ChecksumMismatch { calculated: u16, received: u16 },
    /// Candidate frame shorter than the minimum; one byte dropped
    TooShortFrame { len: usize },
    /// A frame passed validation and was consumed
    FrameDecoded(Measurement),
}

impl SyncEvent {
    /// True for events that consumed a valid frame
    pub fn is_frame(&self) -> bool {
        matches!(self, SyncEvent::FrameDecoded(_))
    }
}

/// Where the synchronizer stands, derived from the buffer contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SyncState {
    /// Not enough bytes for a preamble, or no header at the buffer start
    Hunting,
    /// Header and length seen, waiting for the rest of the frame
    LengthKnown { total_len: usize },
    /// A full candidate frame is buffered
    FrameReady { total_len: usize },
}

/// Streaming frame synchronizer
#[derive(Debug, Clone, Default)]
pub struct FrameSynchronizer {
    buffer: FrameBuffer,
}

impl FrameSynchronizer {
    /// Create a synchronizer with an empty buffer
    pub const fn new() -> Self {
        Self {
            buffer: FrameBuffer::new(),
        }
    }

    /// Discard any partially received data
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Read-only access to the receive buffer
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Derive the current state from the buffer
    pub fn state(&self) -> SyncState {
        let bytes = self.buffer.as_slice();
        if bytes.len() < PREAMBLE_LEN || !bytes.starts_with(&FRAME_HEADER) {
            return SyncState::Hunting;
        }
        let declared = payload_len(bytes) as usize;
        if declared > MAX_PAYLOAD_SIZE {
            return SyncState::Hunting;
        }
        let total_len = PREAMBLE_LEN + declared + CRC_LEN;
        if bytes.len() < total_len {
            SyncState::LengthKnown { total_len }
        } else {
            SyncState::FrameReady { total_len }
        }
    }

    /// Feed one byte from the stream
    ///
    /// `on_event` is called for every resynchronization step and for every
    /// decoded frame, in order. A single byte can complete more than one
    /// frame when a false header was hiding a real frame behind it.
    pub fn feed<F>(&mut self, byte: u8, on_event: &mut F)
    where
        F: FnMut(SyncEvent),
    {
        if let Err(overflow) = self.buffer.push(byte) {
            on_event(SyncEvent::BufferOverflow {
                discarded: overflow.discarded,
            });
            return;
        }

        while self.buffer.has_at_least(PREAMBLE_LEN) {
            let bytes = self.buffer.as_slice();

            if !bytes.starts_with(&FRAME_HEADER) {
                let dropped = bytes[0];
                self.buffer.drop_front(1);
                on_event(SyncEvent::HeaderMismatch { dropped });
                continue;
            }

            let declared = payload_len(bytes);
            if declared as usize > MAX_PAYLOAD_SIZE {
                self.buffer.drop_front(1);
                on_event(SyncEvent::OversizedPayloadField {
                    payload_len: declared,
                });
                continue;
            }

            let total_len = PREAMBLE_LEN + declared as usize + CRC_LEN;
            if total_len > self.buffer.capacity() {
                self.buffer.clear();
                on_event(SyncEvent::FrameTooLargeForBuffer { total_len });
                return;
            }

            if !self.buffer.has_at_least(total_len) {
                return;
            }

            match decode(&bytes[..total_len]) {
                Ok(measurement) => {
                    self.buffer.drop_front(total_len);
                    on_event(SyncEvent::FrameDecoded(measurement));
                }
                Err(DecodeError::ChecksumMismatch {
                    calculated,
                    received,
                }) => {
                    self.buffer.drop_front(1);
                    on_event(SyncEvent::ChecksumMismatch {
                        calculated,
                        received,
                    });
                }
                Err(DecodeError::TooShort { len }) => {
                    self.buffer.drop_front(1);
                    on_event(SyncEvent::TooShortFrame { len });
                }
            }
        }
    }

    /// Feed a slice of bytes
    pub fn feed_bytes<F>(&mut self, bytes: &[u8], on_event: &mut F)
    where
        F: FnMut(SyncEvent),
    {
        for &byte in bytes {
            self.feed(byte, on_event);
        }
    }
}
