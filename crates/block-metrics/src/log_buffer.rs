//! Bounded console log sized from the panel it is drawn in.

use std::collections::VecDeque;

/// Scrolling log of console lines, newest last.
///
/// Before each append, the oldest line is dropped once the buffer holds more
/// than `height - margin` lines. The buffer therefore settles at
/// `height - margin + 1` lines and never grows past `height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBuffer {
    lines: VecDeque<String>,
    height: usize,
    margin: usize,
}

impl LogBuffer {
    /// Create a log for a panel `height` rows tall with `margin` reserved rows.
    pub fn new(height: usize, margin: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(height),
            height,
            margin,
        }
    }

    /// Most lines the buffer will hold.
    pub fn max_lines(&self) -> usize {
        (self.height.saturating_sub(self.margin) + 1).min(self.height)
    }

    /// Append a line, dropping the oldest one when the panel is full.
    pub fn push(&mut self, line: impl Into<String>) {
        let max = self.max_lines();
        if max == 0 {
            return;
        }
        while self.lines.len() >= max {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines oldest first.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines joined with newlines, as drawn in the console panel.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_panel_holds_five_lines() {
        let mut log = LogBuffer::new(7, 3);
        for i in 0..20 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.max_lines(), 5);
        assert_eq!(log.len(), 5);
        assert_eq!(
            log.to_vec(),
            vec!["line 15", "line 16", "line 17", "line 18", "line 19"]
        );
    }

    #[test]
    fn test_text_joins_in_order() {
        let mut log = LogBuffer::new(7, 3);
        log.push("first");
        log.push("second");
        assert_eq!(log.text(), "first\nsecond");
    }

    #[test]
    fn test_degenerate_heights() {
        let mut empty = LogBuffer::new(0, 3);
        empty.push("dropped");
        assert!(empty.is_empty());

        let mut tiny = LogBuffer::new(2, 3);
        tiny.push("a");
        tiny.push("b");
        assert_eq!(tiny.to_vec(), vec!["b"]);

        let mut no_margin = LogBuffer::new(3, 0);
        for line in ["a", "b", "c", "d"] {
            no_margin.push(line);
        }
        assert_eq!(no_margin.to_vec(), vec!["b", "c", "d"]);
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_height(
            height in 0usize..32,
            margin in 0usize..8,
            pushes in 0usize..100,
        ) {
            let mut log = LogBuffer::new(height, margin);
            for i in 0..pushes {
                log.push(i.to_string());
                prop_assert!(log.len() <= height);
            }
            if pushes > 0 && log.max_lines() > 0 {
                let newest = (pushes - 1).to_string();
                prop_assert_eq!(log.lines().last(), Some(newest.as_str()));
            }
        }
    }
}
