use std::{cell::RefCell, rc::Rc};

use paperfold::observer::{PaperEvent, PaperObserver};

/// Observer that keeps every event it sees. Clones share the same log.
#[derive(Clone, Default)]
pub(crate) struct RecordingObserver {
    events: Rc<RefCell<Vec<PaperEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Option<Box<dyn PaperObserver>> {
        Some(Box::new(self.clone()))
    }

    pub fn events(&self) -> Vec<PaperEvent> {
        self.events.borrow().clone()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl PaperObserver for RecordingObserver {
    fn notify(&mut self, event: &PaperEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
