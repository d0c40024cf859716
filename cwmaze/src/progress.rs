use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Shared stop flag, clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct Flag(Arc<AtomicBool>);

impl Flag {
    pub fn new() -> Self {
        Flag(Arc::new(AtomicBool::new(false)))
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::Flag;

    #[test]
    fn clones_share_state() {
        let flag = Flag::new();
        let other = flag.clone();
        assert!(!other.is_stopped());

        flag.stop();
        assert!(other.is_stopped());
        assert!(!Flag::default().is_stopped());
    }
}
