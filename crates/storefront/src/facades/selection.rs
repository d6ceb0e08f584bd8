use crate::state::AppState;
use tokio::sync::watch;

/// A projection of the state that reports only real changes
///
/// Each `Selection` tracks the last value it handed out, so subscribers see
/// a value once per change no matter how many unrelated transitions happen
/// in between. Selections are independent of each other.
pub struct Selection<T> {
    rx: watch::Receiver<AppState>,
    project: Box<dyn Fn(&AppState) -> T + Send + Sync>,
    last: T,
}

impl<T: Clone + PartialEq> Selection<T> {
    pub fn new<F>(mut rx: watch::Receiver<AppState>, project: F) -> Self
    where
        F: Fn(&AppState) -> T + Send + Sync + 'static,
    {
        let last = project(&rx.borrow_and_update());
        Self {
            rx,
            project: Box::new(project),
            last,
        }
    }

    /// Projection of the latest published state
    pub fn current(&self) -> T {
        (self.project)(&self.rx.borrow())
    }

    /// The new value if the projection changed since the last call
    pub fn try_next(&mut self) -> Option<T> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        let value = (self.project)(&self.rx.borrow_and_update());
        self.accept(value)
    }

    /// Wait for the projection to change
    ///
    /// Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            self.rx.changed().await.ok()?;
            let value = (self.project)(&self.rx.borrow_and_update());
            if let Some(value) = self.accept(value) {
                return Some(value);
            }
        }
    }

    fn accept(&mut self, value: T) -> Option<T> {
        if value == self.last {
            return None;
        }
        self.last = value.clone();
        Some(value)
    }
}
