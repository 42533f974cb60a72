//! The per-instance decoder: a small state machine fed one byte at a time,
//! with the dispatcher running inline whenever a message completes.

use crate::{
    handlers::Handlers,
    primitive::{u4, u7},
    status::{data_len, is_status, StatusCategory, StatusKind},
};

/// The last (possibly still in progress) MIDI message seen by a stream.
///
/// `status` holds the raw wire value. Handlers receive a copy whose Channel
/// Voice channel nibble has already been stripped; the copy stored inside the
/// stream keeps the full byte, since it may be reused by a running-status
/// continuation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Message {
    /// The raw status byte.
    pub status: u8,
    /// The first data byte, or zero if the message carries none.
    pub data0: u7,
    /// The second data byte, or zero if the message carries fewer than two.
    pub data1: u7,
}
impl Message {
    const fn empty() -> Message {
        Message {
            status: 0,
            data0: u7::new(0),
            data1: u7::new(0),
        }
    }
}

/// Progress through the current message.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum State {
    /// Waiting for a status byte, or for a running-status data byte.
    Status,
    /// Waiting for the first data byte.
    Data0,
    /// Waiting for the second data byte.
    Data1,
    /// Message complete. Transient: dispatch runs before control returns.
    Full,
}

/// A streaming MIDI decoder bound to a receive channel.
///
/// Feed it bytes as they come off the wire, along with a
/// [`Handlers`](struct.Handlers.html) table and a context value; completed
/// messages are dispatched synchronously from inside the feed call.
///
/// Every piece of parse state lives in the instance, so any number of
/// independent streams can run concurrently as long as each one is
/// exclusively owned. There is no timeout: a message interrupted mid-parse
/// simply waits for its next byte, forever if need be.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MidiStream {
    pub(crate) state: State,
    pub(crate) message: Message,
    /// Data bytes still expected for the current message.
    pub(crate) pending: u8,
    pub(crate) channel: u4,
}
impl MidiStream {
    /// Create a decoder that accepts Channel Voice messages on `channel`.
    ///
    /// The channel is fixed for the lifetime of the stream.
    pub const fn new(channel: u4) -> MidiStream {
        MidiStream {
            state: State::Status,
            message: Message::empty(),
            pending: 0,
            channel,
        }
    }

    /// The receive channel this stream was configured with.
    #[inline]
    pub const fn channel(&self) -> u4 {
        self.channel
    }

    /// The last (possibly still in progress) message.
    #[inline]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Feed a single byte to the stream.
    ///
    /// If the byte completes a message, the matching handler (if any) runs
    /// before this call returns. Designed to be called straight from a
    /// receive interrupt or a polling loop.
    pub fn feed_byte<C>(&mut self, byte: u8, handlers: &Handlers<C>, ctx: &mut C) {
        match self.state {
            State::Status => {
                if is_status(byte) {
                    self.begin(byte);
                } else {
                    // Running status: reuse the retained status byte for a
                    // consecutive message of the same kind.
                    self.message.data0 = u7::new(byte);
                    self.pending = data_len(self.message.status).saturating_sub(1);
                    self.state = if self.pending > 0 {
                        State::Data1
                    } else {
                        State::Full
                    };
                }
            }
            State::Data0 => {
                if is_status(byte) {
                    // Bytes were lost somewhere. Drop the partial message and
                    // resynchronize on the fresh status.
                    trace!("status byte arrived mid-message, restarting");
                    self.begin(byte);
                } else {
                    self.message.data0 = u7::new(byte);
                    self.pending -= 1;
                    self.state = if self.pending > 0 {
                        State::Data1
                    } else {
                        State::Full
                    };
                }
            }
            State::Data1 => {
                if is_status(byte) {
                    trace!("status byte arrived mid-message, restarting");
                    self.begin(byte);
                } else {
                    self.message.data1 = u7::new(byte);
                    self.pending = 0;
                    self.state = State::Full;
                }
            }
            // Not a receiving state: dispatch resets it before control ever
            // returns to the caller.
            State::Full => {}
        }

        if self.state == State::Full {
            self.dispatch(handlers, ctx);
        }
    }

    /// Feed a chunk of bytes, in order.
    ///
    /// Equivalent to calling [`feed_byte`](#method.feed_byte) once per byte;
    /// a single call may dispatch any number of messages.
    pub fn feed<C>(&mut self, bytes: &[u8], handlers: &Handlers<C>, ctx: &mut C) {
        for &byte in bytes {
            self.feed_byte(byte, handlers, ctx);
        }
    }

    /// Discard any in-progress message and clear running status.
    ///
    /// Meant for transports that detect an event boundary out of band, such
    /// as a break on the line.
    pub fn reset(&mut self) {
        self.message = Message::empty();
        self.pending = 0;
        self.state = State::Status;
    }

    /// Begin a fresh message on `status`, abandoning any previous progress.
    fn begin(&mut self, status: u8) {
        self.message.status = status;
        self.message.data0 = u7::new(0);
        self.message.data1 = u7::new(0);
        self.pending = data_len(status);
        self.state = if self.pending > 0 {
            State::Data0
        } else {
            State::Full
        };
    }

    /// Filter, look up, invoke, reset.
    fn dispatch<C>(&mut self, handlers: &Handlers<C>, ctx: &mut C) {
        let mut dispatched = self.message;
        if StatusCategory::of(dispatched.status) == StatusCategory::ChannelVoice {
            if u4::new(dispatched.status) != self.channel {
                // Addressed to some other device. Forget the status as well,
                // so the foreign running-status chain cannot leak through.
                trace!("discarding message for a foreign channel");
                self.message = Message::empty();
                self.pending = 0;
                self.state = State::Status;
                return;
            }
            // The channel is consumed by the filter: handlers see the bare
            // message-type nibble. The stored status keeps the channel so
            // that running status keeps working.
            dispatched.status &= 0xF0;
        }

        let handler = StatusKind::from_code(dispatched.status).and_then(|kind| handlers.get(kind));
        if let Some(handler) = handler {
            handler(ctx, dispatched, self.channel);
        }

        // Keep the status for a possible running-status continuation.
        self.message.data0 = u7::new(0);
        self.message.data1 = u7::new(0);
        self.pending = 0;
        self.state = State::Status;
    }
}
