use std::sync::{Arc, Mutex};

use karat::port::{TuningEvent, TuningObserver};

/// Observer that keeps every event for later assertions.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<TuningEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TuningEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Objectives of every `Improved` event, in emission order.
    pub fn improvements(&self) -> Vec<f64> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                TuningEvent::Improved { objective, .. } => Some(objective),
                _ => None,
            })
            .collect()
    }

    pub fn count_progress(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| matches!(event, TuningEvent::Progress { .. }))
            .count()
    }
}

impl TuningObserver for RecordingObserver {
    fn observe(&self, event: TuningEvent) {
        self.events.lock().unwrap().push(event);
    }
}
