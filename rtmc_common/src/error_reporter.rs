//! The error reporter contract (consumed, never implemented here).

/// A formatted message sink the supervisor reads from. Real
/// implementations might forward into a ring buffer shared with the
/// supervisor process; here it is purely a trait boundary.
pub trait ErrorReporter {
    fn report(&mut self, message: &str);
}
