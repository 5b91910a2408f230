/// Caller-owned position in a chunk list, clamped to `[0, len - 1]`.
///
/// Moving past either end stops at the boundary instead of failing. An empty
/// cursor stays at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    position: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { position: 0, len }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when the cursor sits on the final chunk (or the list is empty).
    pub fn is_last(&self) -> bool {
        self.position + 1 >= self.len
    }

    fn last(&self) -> usize {
        self.len.saturating_sub(1)
    }

    pub fn seek(&mut self, index: usize) -> usize {
        self.position = index.min(self.last());
        self.position
    }

    /// Move by `delta` chunks in either direction.
    pub fn step(&mut self, delta: isize) -> usize {
        let target = if delta < 0 {
            self.position.saturating_sub(delta.unsigned_abs())
        } else {
            self.position.saturating_add(delta as usize)
        };
        self.seek(target)
    }

    pub fn advance(&mut self) -> usize {
        self.step(1)
    }

    pub fn retreat(&mut self) -> usize {
        self.step(-1)
    }

    pub fn rewind(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_at_both_ends() {
        let mut cursor = Cursor::new(3);
        assert_eq!(cursor.retreat(), 0);
        assert_eq!(cursor.advance(), 1);
        assert_eq!(cursor.advance(), 2);
        assert!(cursor.is_last());
        assert_eq!(cursor.advance(), 2);
        assert_eq!(cursor.step(-10), 0);
        assert_eq!(cursor.step(isize::MAX), 2);
    }

    #[test]
    fn moves_from_start() {
        let mut cursor = Cursor::new(5);
        assert_eq!(cursor.advance(), 1);
    }

    #[test]
    fn seek_past_end_lands_on_last() {
        let mut cursor = Cursor::new(4);
        assert_eq!(cursor.seek(100), 3);
        cursor.rewind();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn empty_cursor_stays_put() {
        let mut cursor = Cursor::new(0);
        assert!(cursor.is_empty());
        assert!(cursor.is_last());
        assert_eq!(cursor.advance(), 0);
        assert_eq!(cursor.seek(7), 0);
    }
}
