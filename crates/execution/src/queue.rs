use std::collections::VecDeque;
use std::sync::Mutex;

/// A thread-safe, multi-producer/single-consumer FIFO queue: the only
/// shared mutable state between an exchange's internal machinery and the
/// session that drains it.
#[derive(Debug, Default)]
pub struct Queue<T> {
    inner: Mutex<VecDeque<T>>,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Queue { inner: Mutex::new(VecDeque::new()) }
    }

    pub fn push(&self, item: T) {
        self.inner.lock().expect("queue mutex poisoned").push_back(item);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("queue mutex poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("queue mutex poisoned").len()
    }

    /// Atomically drains every item currently queued, in FIFO order.
    pub fn drain_all(&self) -> Vec<T> {
        self.inner.lock().expect("queue mutex poisoned").drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_all_is_fifo_and_atomic() {
        let q = Queue::new();
        q.push(1);
        q.push(2);
        q.push(3);
        assert_eq!(q.drain_all(), vec![1, 2, 3]);
        assert!(q.is_empty());
    }
}
