//! The handler table: at most one callback per status kind.

use crate::{primitive::u4, status::StatusKind, stream::Message};
use core::fmt;

/// A registered callback.
///
/// Receives the caller's context, the completed message (Channel Voice
/// statuses arrive with the channel nibble stripped) and the receive channel
/// of the dispatching stream.
///
/// Handlers run synchronously inside the feed call, possibly in interrupt
/// context: they must be quick, and must not block or feed bytes back into
/// the stream that invoked them.
pub type Handler<C> = fn(ctx: &mut C, msg: Message, channel: u4);

/// Maps each of the 23 defined status kinds to at most one handler.
///
/// The table is plain data: build it once at setup, then hand shared
/// references to the feed calls. Kinds without a handler are no-ops.
/// Registering over an occupied slot replaces the previous handler.
///
/// The context type `C` is chosen by the caller and passed to every handler,
/// which keeps the table const-constructible (it can live in a `static`)
/// while still letting handlers carry state.
pub struct Handlers<C> {
    table: [Option<Handler<C>>; StatusKind::ALL.len()],
}
impl<C> Handlers<C> {
    /// An empty table: every kind is a no-op.
    pub const fn new() -> Handlers<C> {
        Handlers {
            table: [None; StatusKind::ALL.len()],
        }
    }

    /// Install `handler` for `kind`, replacing any previous handler.
    pub fn register(&mut self, kind: StatusKind, handler: Handler<C>) {
        self.table[kind.slot()] = Some(handler);
    }

    /// Return `kind` to a no-op.
    pub fn unregister(&mut self, kind: StatusKind) {
        self.table[kind.slot()] = None;
    }

    /// The handler currently registered for `kind`, if any.
    #[inline]
    pub fn get(&self, kind: StatusKind) -> Option<Handler<C>> {
        self.table[kind.slot()]
    }
}
impl<C> Default for Handlers<C> {
    #[inline]
    fn default() -> Handlers<C> {
        Handlers::new()
    }
}
impl<C> Clone for Handlers<C> {
    #[inline]
    fn clone(&self) -> Handlers<C> {
        Handlers { table: self.table }
    }
}
impl<C> fmt::Debug for Handlers<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handlers[")?;
        let mut sep = "";
        for &kind in StatusKind::ALL.iter() {
            if self.get(kind).is_some() {
                write!(f, "{}{:?}", sep, kind)?;
                sep = ", ";
            }
        }
        write!(f, "]")
    }
}
