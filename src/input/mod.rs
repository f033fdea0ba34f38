mod clipboard;
mod reader;

pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use reader::{InputProvider, InputReader, InputSource, SystemInput};
