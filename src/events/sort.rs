use super::types::{TradeEvent, TransferEvent};

/// An event with a position in the chain.
pub trait Chronological {
    fn block_number(&self) -> u64;
    fn log_index(&self) -> u64;

    /// Total order key: block first, then position within the block.
    fn chain_position(&self) -> (u64, u64) {
        (self.block_number(), self.log_index())
    }
}

impl<T: Chronological + ?Sized> Chronological for &T {
    fn block_number(&self) -> u64 {
        (**self).block_number()
    }

    fn log_index(&self) -> u64 {
        (**self).log_index()
    }
}

impl Chronological for TradeEvent {
    fn block_number(&self) -> u64 {
        self.block_number
    }

    fn log_index(&self) -> u64 {
        self.log_index
    }
}

impl Chronological for TransferEvent {
    fn block_number(&self) -> u64 {
        self.block_number
    }

    fn log_index(&self) -> u64 {
        self.log_index
    }
}

/// Oldest first. The sort is stable, so equal positions keep their input order.
pub fn sort_events<T: Chronological>(events: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut events: Vec<T> = events.into_iter().collect();
    events.sort_by_key(|e| e.chain_position());
    events
}
