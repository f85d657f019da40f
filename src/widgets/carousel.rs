//! Testimonial slider position.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move forward, wrapping to the first slide. No-op without slides.
    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Move back, wrapping to the last slide. No-op without slides.
    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// CSS transform showing the current slide.
    pub fn transform(&self) -> String {
        format!("translateX(-{}%)", self.index * 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps_both_ways() {
        let mut c = Carousel::new(3);
        assert_eq!(c.prev(), 2);
        assert_eq!(c.transform(), "translateX(-200%)");
        assert_eq!(c.next(), 0);
        assert_eq!(c.next(), 1);
        assert_eq!(c.transform(), "translateX(-100%)");
    }

    #[test]
    fn test_empty_is_noop() {
        let mut c = Carousel::new(0);
        assert_eq!(c.next(), 0);
        assert_eq!(c.prev(), 0);
        assert_eq!(c.transform(), "translateX(-0%)");
    }
}
