//! Last-click-wins fencing for overlapping fetches.
//!
//! Every load gets a token from its channel. A response is applied only if its
//! token is still the newest one issued on that channel, so a slow reply to an
//! old click can never overwrite the reply to a newer one.

use std::collections::HashMap;

/// Independent request streams of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Titles + KPIs on startup.
    Bootstrap,
    Kpis,
    History,
    Forecast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

#[derive(Debug, Default)]
pub struct RequestFence {
    issued: HashMap<Channel, u64>,
    settled: HashMap<Channel, u64>,
}

impl RequestFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request on `channel`, superseding any in flight.
    pub fn issue(&mut self, channel: Channel) -> RequestToken {
        let counter = self.issued.entry(channel).or_insert(0);
        *counter += 1;
        RequestToken(*counter)
    }

    /// Whether `token` is the newest request on `channel`.
    pub fn accept(&self, channel: Channel, token: RequestToken) -> bool {
        self.issued.get(&channel) == Some(&token.0)
    }

    /// Accept and mark the channel idle. Returns `false` for stale tokens.
    pub fn settle(&mut self, channel: Channel, token: RequestToken) -> bool {
        if !self.accept(channel, token) {
            return false;
        }
        self.settled.insert(channel, token.0);
        true
    }

    /// Whether the newest request on `channel` has not been settled yet.
    pub fn is_pending(&self, channel: Channel) -> bool {
        match self.issued.get(&channel) {
            Some(issued) => self.settled.get(&channel) != Some(issued),
            None => false,
        }
    }
}
