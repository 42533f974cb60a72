//! Classification of raw MIDI status bytes.
//!
//! Channel Voice statuses are identified by their top nibble alone (the low
//! nibble carries the channel), while System statuses occupy the full
//! `0xF0..=0xFF` range and are identified by the exact byte. All of the
//! constants here are wire-format values and are kept bit-exact.

/// Returns `true` iff `byte` is a status byte, that is, iff its most
/// significant bit is set.
///
/// Everything else is a data byte.
#[inline]
pub const fn is_status(byte: u8) -> bool {
    byte & 0x80 != 0
}

/// The number of data bytes that follow a status byte.
///
/// Bytes that do not start a message (anything below `0x80` once the channel
/// nibble is masked off) expect no data.
pub fn data_len(status: u8) -> u8 {
    // The channel nibble never affects the length.
    let status = if status < 0xF0 { status & 0xF0 } else { status };
    match status {
        // Note off/on, aftertouch, controller, pitch bend
        0x80 | 0x90 | 0xA0 | 0xB0 | 0xE0 => 2,
        // Program change, channel aftertouch
        0xC0 | 0xD0 => 1,
        // TODO: a SysEx start should consume its payload up to the end
        // marker, but variable-length capture is unsupported, so the message
        // completes at the status byte itself.
        0xF0 => 0,
        // MTC quarter frame, song select
        0xF1 | 0xF3 => 1,
        // Song position
        0xF2 => 2,
        // Remaining System Common and all System Realtime
        _ => 0,
    }
}

/// The broad category of a raw byte.
///
/// Derived from the byte on demand, never stored.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusCategory {
    /// Not a status byte at all.
    NoStatus,
    /// Messages carrying a channel number in the low nibble of their status.
    ChannelVoice,
    /// `0xF0..=0xF7`, identified by the full status byte.
    SystemCommon,
    /// `0xF8..=0xFF`, single-byte time-critical messages.
    SystemRealtime,
}
impl StatusCategory {
    /// Classify a raw byte.
    pub fn of(status: u8) -> StatusCategory {
        let status = if status < 0xF0 { status & 0xF0 } else { status };
        match status {
            0x00..=0x7F => StatusCategory::NoStatus,
            0x80..=0xEF => StatusCategory::ChannelVoice,
            0xF0..=0xF7 => StatusCategory::SystemCommon,
            0xF8..=0xFF => StatusCategory::SystemRealtime,
        }
    }
}

/// One of the 23 message kinds defined by the MIDI wire format.
///
/// Channel Voice kinds are identified by their message-type nibble alone: the
/// channel lives in the low nibble of the status byte and is consumed by the
/// channel filter before dispatch. System kinds are identified by the full
/// status byte.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusKind {
    NoteOff,
    NoteOn,
    /// Polyphonic key pressure.
    Aftertouch,
    Controller,
    ProgramChange,
    /// Channel-wide key pressure.
    ChannelAftertouch,
    PitchBend,
    /// System Exclusive start.
    ///
    /// Dispatched as soon as the `0xF0` status byte arrives, with no payload.
    /// See the crate documentation.
    SysEx,
    MtcQuarterFrame,
    SongPosition,
    SongSelect,
    /// The undefined System Common code `0xF4`.
    UndefinedF4,
    /// The undefined System Common code `0xF5`.
    UndefinedF5,
    TuneRequest,
    /// System Exclusive end marker.
    SysExEnd,
    TimingClock,
    /// The undefined System Realtime code `0xF9`.
    UndefinedF9,
    Start,
    Continue,
    Stop,
    /// The undefined System Realtime code `0xFD`.
    UndefinedFD,
    ActiveSensing,
    Reset,
}
impl StatusKind {
    /// Every defined status kind, in ascending code order.
    pub const ALL: [StatusKind; 23] = [
        StatusKind::NoteOff,
        StatusKind::NoteOn,
        StatusKind::Aftertouch,
        StatusKind::Controller,
        StatusKind::ProgramChange,
        StatusKind::ChannelAftertouch,
        StatusKind::PitchBend,
        StatusKind::SysEx,
        StatusKind::MtcQuarterFrame,
        StatusKind::SongPosition,
        StatusKind::SongSelect,
        StatusKind::UndefinedF4,
        StatusKind::UndefinedF5,
        StatusKind::TuneRequest,
        StatusKind::SysExEnd,
        StatusKind::TimingClock,
        StatusKind::UndefinedF9,
        StatusKind::Start,
        StatusKind::Continue,
        StatusKind::Stop,
        StatusKind::UndefinedFD,
        StatusKind::ActiveSensing,
        StatusKind::Reset,
    ];

    /// The wire-format status code for this kind.
    ///
    /// Channel Voice kinds yield their message-type nibble with a zero
    /// channel; combine with a channel number to form a full status byte.
    pub const fn code(self) -> u8 {
        use StatusKind::*;
        match self {
            NoteOff => 0x80,
            NoteOn => 0x90,
            Aftertouch => 0xA0,
            Controller => 0xB0,
            ProgramChange => 0xC0,
            ChannelAftertouch => 0xD0,
            PitchBend => 0xE0,
            SysEx => 0xF0,
            MtcQuarterFrame => 0xF1,
            SongPosition => 0xF2,
            SongSelect => 0xF3,
            UndefinedF4 => 0xF4,
            UndefinedF5 => 0xF5,
            TuneRequest => 0xF6,
            SysExEnd => 0xF7,
            TimingClock => 0xF8,
            UndefinedF9 => 0xF9,
            Start => 0xFA,
            Continue => 0xFB,
            Stop => 0xFC,
            UndefinedFD => 0xFD,
            ActiveSensing => 0xFE,
            Reset => 0xFF,
        }
    }

    /// The exact inverse of [`code`](#method.code).
    ///
    /// Returns `None` for anything that is not an exact kind code, including
    /// Channel Voice statuses with a nonzero channel nibble. Use
    /// [`from_status`](#method.from_status) to classify those.
    pub fn from_code(code: u8) -> Option<StatusKind> {
        use StatusKind::*;
        Some(match code {
            0x80 => NoteOff,
            0x90 => NoteOn,
            0xA0 => Aftertouch,
            0xB0 => Controller,
            0xC0 => ProgramChange,
            0xD0 => ChannelAftertouch,
            0xE0 => PitchBend,
            0xF0 => SysEx,
            0xF1 => MtcQuarterFrame,
            0xF2 => SongPosition,
            0xF3 => SongSelect,
            0xF4 => UndefinedF4,
            0xF5 => UndefinedF5,
            0xF6 => TuneRequest,
            0xF7 => SysExEnd,
            0xF8 => TimingClock,
            0xF9 => UndefinedF9,
            0xFA => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFD => UndefinedFD,
            0xFE => ActiveSensing,
            0xFF => Reset,
            _ => return None,
        })
    }

    /// Classify an arbitrary status byte, masking the channel nibble off
    /// Channel Voice statuses.
    ///
    /// Returns `None` for data bytes.
    pub fn from_status(status: u8) -> Option<StatusKind> {
        let status = if status < 0xF0 { status & 0xF0 } else { status };
        StatusKind::from_code(status)
    }

    /// The broad category this kind belongs to.
    #[inline]
    pub fn category(self) -> StatusCategory {
        StatusCategory::of(self.code())
    }

    /// The number of data bytes that follow this kind's status byte.
    #[inline]
    pub fn data_len(self) -> u8 {
        data_len(self.code())
    }

    /// The handler table slot for this kind.
    ///
    /// Channel Voice kinds occupy slots `0..=6`, System kinds `7..=22`.
    #[inline]
    pub(crate) fn slot(self) -> usize {
        let code = self.code();
        if code < 0xF0 {
            ((code >> 4) - 8) as usize
        } else {
            7 + (code & 0x0F) as usize
        }
    }
}
