/// Holds the latest pushed value until `delay_ms` pass without another push.
///
/// Clock-free: callers pass `now_ms`, and a browser timer decides when to poll.
#[derive(Clone, Debug)]
pub(crate) struct Debouncer<T> {
    delay_ms: i64,
    pending: Option<(T, i64)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: i64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Replaces any pending value and restarts the window. Returns the deadline.
    pub fn push(&mut self, value: T, now_ms: i64) -> i64 {
        let deadline = now_ms.saturating_add(self.delay_ms);
        self.pending = Some((value, deadline));
        deadline
    }

    pub fn deadline(&self) -> Option<i64> {
        self.pending.as_ref().map(|(_, d)| *d)
    }

    /// Releases the pending value once its deadline has passed.
    pub fn take_due(&mut self, now_ms: i64) -> Option<T> {
        match self.pending.take() {
            Some((value, deadline)) if now_ms >= deadline => Some(value),
            other => {
                self.pending = other;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_released_after_window() {
        let mut d = Debouncer::new(500);
        assert_eq!(d.push("cat", 1_000), 1_500);
        assert_eq!(d.take_due(1_499), None);
        assert_eq!(d.take_due(1_500), Some("cat"));
        assert_eq!(d.take_due(2_000), None);
        assert_eq!(d.deadline(), None);
    }

    #[test]
    fn test_new_push_restarts_window_and_replaces_value() {
        let mut d = Debouncer::new(500);
        d.push("cat", 0);
        d.push("catalog", 200);
        assert_eq!(d.take_due(500), None);
        assert_eq!(d.deadline(), Some(700));
        assert_eq!(d.take_due(700), Some("catalog"));
    }
}
