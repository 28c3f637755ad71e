/// Orders overlapping list re-fetches. Every fetch takes a ticket; only the
/// response for the newest ticket may replace the list.
#[derive(Debug, Default)]
pub struct RefreshGate {
    latest: u64,
}

impl RefreshGate {
    pub fn begin(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}
