//! The unit a cost function is evaluated on.

use chrono::NaiveDateTime;

use wt_core::EdgeId;

/// One directed pass over an edge.
///
/// `prev_edge` is the edge the traveller arrives from (turn context) and is
/// [`EdgeId::INVALID`] at the start of a search.  `at` is the time the edge
/// is entered, used by time-conditional speeds; searches that do not track
/// time leave it `None`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct EdgeTraversal {
    pub edge:      EdgeId,
    pub reverse:   bool,
    pub prev_edge: EdgeId,
    pub at:        Option<NaiveDateTime>,
}

impl EdgeTraversal {
    pub fn new(edge: EdgeId, reverse: bool) -> Self {
        Self { edge, reverse, prev_edge: EdgeId::INVALID, at: None }
    }

    pub fn forward(edge: EdgeId) -> Self {
        Self::new(edge, false)
    }

    pub fn from_edge(mut self, prev_edge: EdgeId) -> Self {
        self.prev_edge = prev_edge;
        self
    }

    pub fn at(mut self, at: NaiveDateTime) -> Self {
        self.at = Some(at);
        self
    }

    #[inline]
    pub fn has_turn_context(&self) -> bool {
        self.prev_edge.is_valid()
    }
}
