/// Receives row-completion notifications while a node walks its batch.
pub trait Progress {
    /// Called once after row `row` (zero based) has produced its result.
    fn advance(&mut self, row: usize);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn advance(&mut self, _row: usize) {}
}

/// Records the reported rows in order.
impl Progress for Vec<usize> {
    fn advance(&mut self, row: usize) {
        self.push(row);
    }
}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn advance(&mut self, row: usize) {
        (**self).advance(row);
    }
}
