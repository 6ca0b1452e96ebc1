use std::sync::mpsc;

use crate::foundation::error::{GridmorphError, GridmorphResult};

/// Create an unbounded FIFO queue, returning the producer and consumer
/// halves.
///
/// The queue is the single synchronization point between the input side and
/// the animation consumer: commands cross the thread boundary here and
/// nowhere else.
pub fn queue<T>() -> (QueueSender<T>, CommandQueue<T>) {
    let (tx, rx) = mpsc::channel();
    (QueueSender { tx }, CommandQueue { rx })
}

/// Producer half: appends to the queue tail.
#[derive(Debug)]
pub struct QueueSender<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Append an item to the tail. Never blocks; the channel is unbounded,
    /// so backlog grows without bound if the consumer falls behind.
    pub fn enqueue(&self, item: T) -> GridmorphResult<()> {
        self.tx
            .send(item)
            .map_err(|_| GridmorphError::engine("command queue consumer is gone"))
    }
}

/// Consumer half: drains pending items without blocking.
#[derive(Debug)]
pub struct CommandQueue<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> CommandQueue<T> {
    /// Return all currently queued items in FIFO order, emptying the queue.
    /// Never blocks; returns an empty vec when nothing is pending.
    pub fn drain_all(&self) -> Vec<T> {
        self.rx.try_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_fifo_order() {
        let (tx, rx) = queue();
        for i in 0..5 {
            tx.enqueue(i).unwrap();
        }
        assert_eq!(rx.drain_all(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn empty_drain_does_not_block() {
        let (_tx, rx) = queue::<u32>();
        assert!(rx.drain_all().is_empty());
        assert!(rx.drain_all().is_empty());
    }

    #[test]
    fn enqueue_from_another_thread() {
        let (tx, rx) = queue();
        let handle = std::thread::spawn(move || {
            for i in 0..100 {
                tx.enqueue(i).unwrap();
            }
        });
        handle.join().unwrap();
        assert_eq!(rx.drain_all(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn enqueue_after_consumer_drop_errors() {
        let (tx, rx) = queue();
        drop(rx);
        assert!(tx.enqueue(1).is_err());
    }
}
