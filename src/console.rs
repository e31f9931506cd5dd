//! Output seam for `puts`.
//!
//! The core never assumes where display text goes: the binary wires up
//! stdout, tests capture into a buffer.

pub trait Console {
    fn writeln(&mut self, text: &str);
}

pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn writeln(&mut self, text: &str) {
        println!("{text}");
    }
}

#[derive(Default)]
pub struct BufferedConsole {
    buffer: String,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_data(self) -> String {
        self.buffer
    }
}

impl Console for BufferedConsole {
    fn writeln(&mut self, text: &str) {
        self.buffer.push_str(text);
        self.buffer.push('\n');
    }
}
