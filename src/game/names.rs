use super::board::Mark;

pub const MAX_NAME_LEN: usize = 16;

/// Step-by-step name entry: X first, then O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NameEntry {
    editing: Mark,
    buffer: String,
    name_x: Option<String>,
}

impl Default for NameEntry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameEntry {
    pub fn new() -> Self {
        Self {
            editing: Mark::X,
            buffer: String::new(),
            name_x: None,
        }
    }

    /// Whose name is being typed.
    pub fn editing(&self) -> Mark {
        self.editing
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Append a typed character; control characters and anything past the
    /// length cap are dropped.
    pub fn push(&mut self, c: char) {
        if c.is_control() || self.buffer.chars().count() >= MAX_NAME_LEN {
            return;
        }
        self.buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Confirm the current buffer. Returns both names once O is confirmed.
    pub fn confirm(&mut self) -> Option<(String, String)> {
        let name = match self.buffer.trim() {
            "" => self.editing.default_name().to_string(),
            s => s.to_string(),
        };
        self.buffer.clear();

        match self.editing {
            Mark::X => {
                self.name_x = Some(name);
                self.editing = Mark::O;
                None
            }
            Mark::O => {
                let x = self
                    .name_x
                    .take()
                    .unwrap_or_else(|| Mark::X.default_name().to_string());
                self.editing = Mark::X;
                Some((x, name))
            }
        }
    }
}
