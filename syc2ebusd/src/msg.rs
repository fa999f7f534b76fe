use std::path::Path;

use color_print::cprintln;

#[derive(Debug)]
pub enum Msg {
    Error(String),
    Warn(String),
    Note(String),
}

impl Msg {
    pub fn print(&self) {
        match self {
            Msg::Error(msg) => cprintln!("<red,bold>error</>: {}", msg),
            Msg::Warn(msg) => cprintln!("<yellow,bold>warn</>: {}", msg),
            Msg::Note(msg) => cprintln!("<green,bold>note</>: {}", msg),
        }
    }

    /// Print with the file the message is about.
    pub fn diag(&self, path: &Path) {
        self.print();
        cprintln!("     <blue>--></> <underline>{}</>", path.display());
    }

    /// Print an error together with its chain of causes.
    pub fn error_chain(err: &dyn std::error::Error) {
        Msg::Error(err.to_string()).print();
        let mut source = err.source();
        while let Some(cause) = source {
            cprintln!("      <blue>|</> {}", cause);
            source = cause.source();
        }
    }
}
