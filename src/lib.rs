//! # Overview
//!
//! `midirx` decodes a raw, undelimited stream of MIDI bytes and dispatches
//! every completed message to a caller-registered handler, filtering Channel
//! Voice messages by a configured receive channel.
//!
//! This sort of stream is rare to come by in userspace: it is what a device
//! driver or an embedded microprocessor sees on the wire, one byte per UART
//! interrupt, with no delimiters between messages.
//!
//! The decoder is built for exactly that environment: [`MidiStream::feed_byte`]
//! takes a single byte, never allocates, never blocks, and runs the matching
//! handler synchronously before returning to the caller. Handlers must
//! therefore be fast, and must not block or recurse into the feed.
//!
//! All parse state lives inside the [`MidiStream`] instance itself. Several
//! independent streams (for example two MIDI input ports, serviced from
//! different interrupt priority levels) can be decoded with no shared state
//! and no locking, as long as each instance is exclusively owned by its
//! servicer.
//!
//! [`MidiStream`]: struct.MidiStream.html
//! [`MidiStream::feed_byte`]: struct.MidiStream.html#method.feed_byte
//!
//! # Usage
//!
//! Build a [`Handlers`](struct.Handlers.html) table once at setup, then feed
//! bytes as they arrive:
//!
//! ```rust
//! use midirx::{num::u4, Handlers, Message, MidiStream, StatusKind};
//!
//! struct Synth {
//!     notes_down: u32,
//! }
//!
//! fn note_on(synth: &mut Synth, msg: Message, _channel: u4) {
//!     let _key = msg.data0;
//!     let _vel = msg.data1;
//!     synth.notes_down += 1;
//! }
//!
//! let mut handlers = Handlers::new();
//! handlers.register(StatusKind::NoteOn, note_on);
//!
//! let mut synth = Synth { notes_down: 0 };
//! let mut stream = MidiStream::new(u4::new(0));
//!
//! // Typically called from the receive interrupt, one byte per invocation.
//! for &byte in &[0x90, 60, 127] {
//!     stream.feed_byte(byte, &handlers, &mut synth);
//! }
//!
//! assert_eq!(synth.notes_down, 1);
//! ```
//!
//! Handlers are plain `fn` pointers rather than closures, so the table is
//! const-constructible and can live in a `static`. State is carried through
//! the context parameter (`Synth` above) instead of captures.
//!
//! # Channel filtering and running status
//!
//! Channel Voice messages whose channel nibble does not match the stream's
//! receive channel are discarded without invoking any handler. On a match,
//! the handler sees the status with the channel nibble stripped; the channel
//! itself is passed separately.
//!
//! The status byte of the last message is retained between messages, so
//! consecutive messages of the same kind may omit it (running status), as the
//! MIDI wire format allows.
//!
//! # System Exclusive
//!
//! System Exclusive messages are dispatched as soon as their `0xF0` status
//! byte arrives, with no payload: consuming the variable-length payload up to
//! the end marker is not supported. Interior payload bytes are reinterpreted
//! as a fresh message stream, so a transport that carries SysEx traffic
//! should skip the payload itself before feeding.
//!
//! # Cargo features
//!
//! Two optional features are available, both disabled by default:
//!
//! - The `defmt` feature
//!
//!   Derives `defmt::Format` on the public data types and emits `defmt`
//!   trace diagnostics when a message is silently discarded (an out-of-sync
//!   restart or a foreign-channel discard).
//!
//! - The `log` feature
//!
//!   The same diagnostics through the `log` facade, for hosted targets.
//!
//! With both features disabled the feed path compiles down to the bare state
//! machine, with no formatting code at all.

#![cfg_attr(not(test), no_std)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    }};
}

mod handlers;
mod primitive;
mod status;
mod stream;

pub use crate::{
    handlers::{Handler, Handlers},
    status::{data_len, is_status, StatusCategory, StatusKind},
    stream::{Message, MidiStream},
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u4, u7};
}
