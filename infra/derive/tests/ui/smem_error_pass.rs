use smem_derive::smem_error;
use std::borrow::Cow;

#[smem_error]
pub enum SnapshotError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Corrupt snapshot{}: {message}", format_context(.context))]
    Corrupt { message: Cow<'static, str>, context: Option<std::borrow::Cow<'static, str>> },

    #[error("Missing entry: {message}")]
    Missing { message: Cow<'static, str> },
}

fn read(path: &str) -> Result<Vec<u8>, SnapshotError> {
    std::fs::read(path).context("Reading snapshot")
}

fn main() {
    let _ = read("/nonexistent/snapshot.bin");
}
