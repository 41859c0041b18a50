use std::collections::VecDeque;

/// Rolling list of human-readable load lines. Oldest entry is evicted once
/// the capacity is exceeded.
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn push(&mut self, line: String) {
        self.entries.push_back(line);
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Formats one log line. The source name is right-padded with non-breaking
/// spaces to `name_column` characters so the percentage column lines up in a
/// monospace font.
pub fn format_entry(source_name: &str, progress: f32, name_column: usize) -> String {
    let pad = name_column.saturating_sub(source_name.chars().count());
    let padding = "\u{a0}".repeat(pad);
    let percent = (progress * 100.0).round() as i64;
    format!("Loaded {source_name}{padding} ... {percent}%")
}
