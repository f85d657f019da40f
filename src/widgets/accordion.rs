//! Single-open FAQ accordion.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accordion {
    len: usize,
    open: Option<usize>,
}

impl Accordion {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn open(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Clicking the open item closes it; clicking another opens only that one.
    pub fn toggle(&mut self, index: usize) -> Option<usize> {
        if index >= self.len {
            return self.open;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
        self.open
    }
}
