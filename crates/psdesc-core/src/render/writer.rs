use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Line-oriented text buffer with indentation levels.
#[derive(Debug, Default)]
pub struct TextWriter {
    out: String,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one full line at `level`.
    pub fn line(&mut self, level: usize, args: fmt::Arguments<'_>) {
        for _ in 0..level {
            self.out.push_str(INDENT);
        }
        // Writing into a String cannot fail.
        let _ = self.out.write_fmt(args);
        self.out.push('\n');
    }

    pub fn finish(self) -> String {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::TextWriter;

    #[test]
    fn indents_two_spaces_per_level() {
        let mut writer = TextWriter::new();
        writer.line(0, format_args!("{{"));
        writer.line(2, format_args!("x: {}", 1));
        assert_eq!(writer.finish(), "{\n    x: 1\n");
    }
}
