use parking_lot::Mutex;

/// Render target for one backend's listing. A refresh replaces the whole
/// view in a single call; there is no incremental update, so concurrent
/// refreshes degrade to last-write-wins.
pub trait ListView: Send + Sync {
    fn replace(&self, lines: Vec<String>);
}

/// Terminal view: prints the listing under a backend header.
pub struct TermView {
    title: &'static str,
}

impl TermView {
    pub fn new(title: &'static str) -> Self {
        Self { title }
    }
}

impl ListView for TermView {
    fn replace(&self, lines: Vec<String>) {
        println!("--- {} ({} entries)", self.title, lines.len());
        for line in lines {
            println!("  {line}");
        }
    }
}

/// In-memory view for tests and embedding.
#[derive(Default)]
pub struct BufferView {
    lines: Mutex<Vec<String>>,
}

impl BufferView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl ListView for BufferView {
    fn replace(&self, lines: Vec<String>) {
        *self.lines.lock() = lines;
    }
}
