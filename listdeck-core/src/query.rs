//! Filter state and the time-range projection.

/// The user's current search criteria: a resource-specific filter plus an
/// optional creation-time window.
///
/// `begin_time`/`end_time` are only ever set or cleared together, through
/// [`QueryState::set_time_range`]; the pair view never observes a
/// half-filled range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState<F> {
    pub filter: F,
    begin_time: Option<String>,
    end_time: Option<String>,
}

impl<F> QueryState<F> {
    pub fn new(filter: F) -> Self {
        Self {
            filter,
            begin_time: None,
            end_time: None,
        }
    }

    /// Both ends of the window, or `None` when the window is unset.
    pub fn time_range(&self) -> Option<(&str, &str)> {
        match (self.begin_time.as_deref(), self.end_time.as_deref()) {
            (Some(begin), Some(end)) => Some((begin, end)),
            _ => None,
        }
    }

    pub fn set_time_range(&mut self, range: Option<(String, String)>) {
        match range {
            Some((begin, end)) => {
                self.begin_time = Some(begin);
                self.end_time = Some(end);
            }
            None => {
                self.begin_time = None;
                self.end_time = None;
            }
        }
    }

}
