//! The head/tail torn-read guard shared by every published record.
//!
//! Every record the core exchanges with the supervisor (command, status,
//! debug, config) brackets its body with a `head`/`tail` sequence pair:
//! a writer increments `head` before mutating the body and sets `tail =
//! head` once the mutation is complete. A reader samples `head`, reads
//! the body, then samples `tail`; if the two disagree the write was
//! still in flight and the snapshot must be discarded.
//!
//! This is deliberately simpler than a CRC/heartbeat/version-hash
//! handshake: it detects exactly one thing (a torn read), trades a
//! spurious abort (never a torn value) for occasionally skipping a
//! cycle, and costs two integer loads.

use std::sync::atomic::{AtomicU64, Ordering};

/// The two sequence counters prefixing every bracketed record.
#[derive(Debug, Default)]
#[repr(C)]
pub struct BracketHeader {
    head: AtomicU64,
    tail: AtomicU64,
}

/// A write was observed in flight; the reader must discard this cycle's snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TornRead;

impl BracketHeader {
    pub const fn new() -> Self {
        Self {
            head: AtomicU64::new(0),
            tail: AtomicU64::new(0),
        }
    }

    /// Begin a write: increment `head`, leaving `tail` behind. Between this
    /// call and [`BracketHeader::publish`] the record is in flight.
    pub fn begin_write(&self) {
        self.head.fetch_add(1, Ordering::AcqRel);
    }

    /// Complete a write: equalize `tail` to `head`, making the body visible.
    pub fn publish(&self) {
        let head = self.head.load(Ordering::Acquire);
        self.tail.store(head, Ordering::Release);
    }

    /// Sample `head` before reading the body.
    pub fn sample_head(&self) -> u64 {
        self.head.load(Ordering::Acquire)
    }

    /// Sample `tail` after reading the body and compare against the value
    /// [`BracketHeader::sample_head`] returned. `Err(TornRead)` means the
    /// body must be discarded; the caller should not act on it this cycle.
    pub fn check(&self, sampled_head: u64) -> Result<(), TornRead> {
        if self.tail.load(Ordering::Acquire) == sampled_head {
            Ok(())
        } else {
            Err(TornRead)
        }
    }

    /// `true` once `head == tail`, i.e. no write is in flight.
    pub fn is_settled(&self) -> bool {
        self.head.load(Ordering::Acquire) == self.tail.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_header_is_settled() {
        let h = BracketHeader::new();
        assert!(h.is_settled());
    }

    #[test]
    fn begin_write_leaves_header_unsettled_until_publish() {
        let h = BracketHeader::new();
        let before = h.sample_head();
        h.begin_write();
        assert!(!h.is_settled());
        assert!(h.check(before).is_err());
        h.publish();
        assert!(h.is_settled());
    }

    #[test]
    fn reader_sees_consistent_snapshot_after_publish() {
        let h = BracketHeader::new();
        h.begin_write();
        h.publish();
        let sampled = h.sample_head();
        assert!(h.check(sampled).is_ok());
    }

    #[test]
    fn torn_read_detected_mid_write() {
        let h = BracketHeader::new();
        h.publish();
        let sampled = h.sample_head();
        h.begin_write();
        assert_eq!(h.check(sampled), Err(TornRead));
    }
}
