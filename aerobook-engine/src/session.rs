use aerobook_core::Itinerary;

/// One client session: at most one authenticated identity plus an immutable
/// snapshot of the itineraries returned by the most recent search.
///
/// The engine never owns a session; callers hold one per logical client and
/// pass it into each operation, so several sessions can share one engine.
#[derive(Debug, Clone, Default)]
pub struct Session {
    user: Option<String>,
    itineraries: Vec<Itinerary>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    pub fn itinerary(&self, index: usize) -> Option<&Itinerary> {
        self.itineraries.get(index)
    }

    /// Login resets the snapshot along with the identity.
    pub(crate) fn set_user(&mut self, username: String) {
        self.user = Some(username);
        self.itineraries.clear();
    }

    /// Every successful search replaces the snapshot, including with an
    /// empty one when nothing matched.
    pub(crate) fn replace_snapshot(&mut self, itineraries: Vec<Itinerary>) {
        self.itineraries = itineraries;
    }
}
