//! Session resumption tickets (RFC 5077).

/// A NewSessionTicket payload: lifetime hint plus opaque server state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSessionTicket {
    /// Ticket lifetime hint in seconds; 0 means unspecified/declined
    pub lifetime_hint_secs: u32,

    /// Opaque encrypted session state; empty declines resumption
    pub ticket: Vec<u8>,
}

impl NewSessionTicket {
    /// Create a ticket carrying real session state.
    pub fn new(lifetime_hint_secs: u32, ticket: Vec<u8>) -> Self {
        Self {
            lifetime_hint_secs,
            ticket,
        }
    }

    /// The declining ticket: zero lifetime, empty payload.
    ///
    /// RFC 5077 3.3: sent when the server included the session_ticket
    /// extension in its hello but decided not to store resumption state.
    pub fn declining() -> Self {
        Self {
            lifetime_hint_secs: 0,
            ticket: Vec::new(),
        }
    }

    /// Whether this ticket declines resumption.
    pub fn is_declining(&self) -> bool {
        self.ticket.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declining_ticket() {
        let ticket = NewSessionTicket::declining();
        assert_eq!(ticket.lifetime_hint_secs, 0);
        assert!(ticket.ticket.is_empty());
        assert!(ticket.is_declining());
    }

    #[test]
    fn test_real_ticket() {
        let ticket = NewSessionTicket::new(3600, vec![0xAB; 64]);
        assert_eq!(ticket.lifetime_hint_secs, 3600);
        assert!(!ticket.is_declining());
    }
}
