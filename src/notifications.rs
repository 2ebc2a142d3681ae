use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use crate::error::ClientError;

/// Visual flavor of a banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Success,
    Error,
}

/// One message waiting on screen until its deadline passes or the user
/// dismisses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// An ordered queue of banners with deadline-based auto-dismiss.
///
/// The queue never samples the clock itself; callers pass `now` in.
#[derive(Debug)]
pub struct BannerQueue {
    ttl: Duration,
    next_id: u64,
    banners: VecDeque<Banner>,
}

impl BannerQueue {
    /// A queue whose banners live for `ttl` after being pushed.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 0,
            banners: VecDeque::new(),
        }
    }

    /// Enqueues a banner and returns its id.
    pub fn push(&mut self, kind: BannerKind, message: impl Into<String>, now: DateTime<Utc>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.banners.push_back(Banner {
            id,
            kind,
            message: message.into(),
            expires_at: now + self.ttl,
        });
        id
    }

    /// Enqueues the standard error banner for a failed action, built from
    /// the raw error's string representation.
    pub fn push_error(&mut self, action: &str, error: &ClientError, now: DateTime<Utc>) -> u64 {
        self.push(BannerKind::Error, format!("Failed to {}: {}", action, error), now)
    }

    /// Removes the banner with the given id, if it is still queued.
    pub fn dismiss(&mut self, id: u64) -> Option<Banner> {
        let position = self.banners.iter().position(|banner| banner.id == id)?;
        self.banners.remove(position)
    }

    /// Drops every banner whose deadline has passed and returns them.
    pub fn expire_due(&mut self, now: DateTime<Utc>) -> Vec<Banner> {
        let mut expired = Vec::new();
        self.banners.retain(|banner| {
            if banner.expires_at <= now {
                expired.push(banner.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// The banners currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Banner> {
        self.banners.iter()
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_push_and_expire_respect_deadlines() {
        let mut queue = BannerQueue::new(Duration::seconds(5));

        let first = queue.push(BannerKind::Info, "Curso actualizado", at(0));
        let second = queue.push(BannerKind::Success, "Entrega registrada", at(3));
        assert_eq!(queue.len(), 2);

        // Only the first banner is past its deadline at t=5.
        let expired = queue.expire_due(at(5));
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].id, first);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible().next().unwrap().id, second);

        let expired = queue.expire_due(at(10));
        assert_eq!(expired.len(), 1);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_removes_exactly_one_banner() {
        let mut queue = BannerQueue::new(Duration::seconds(30));

        let first = queue.push(BannerKind::Info, "uno", at(0));
        let second = queue.push(BannerKind::Info, "dos", at(0));

        let dismissed = queue.dismiss(first).unwrap();
        assert_eq!(dismissed.message, "uno");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.visible().next().unwrap().id, second);

        // Dismissing again is a no-op.
        assert!(queue.dismiss(first).is_none());
    }

    #[test]
    fn test_error_banner_carries_the_failure_text() {
        let mut queue = BannerQueue::new(Duration::seconds(30));
        let error = ClientError::Api {
            status: 500,
            message: "storage offline".to_string(),
        };

        queue.push_error("submit exam", &error, at(0));

        let banner = queue.visible().next().unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(
            banner.message,
            "Failed to submit exam: server responded with 500: storage offline"
        );
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let mut queue = BannerQueue::new(Duration::seconds(1));
        let a = queue.push(BannerKind::Info, "a", at(0));
        let b = queue.push(BannerKind::Info, "b", at(0));
        assert!(b > a);

        queue.expire_due(at(2));
        let c = queue.push(BannerKind::Info, "c", at(3));
        assert!(c > b);
    }
}
