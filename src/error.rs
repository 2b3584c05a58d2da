use std::io;
use std::path::PathBuf;

/// Everything that can abort a conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("cannot read {}: {source}", .path.display())]
    ReadInput { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    WriteOutput { path: PathBuf, source: io::Error },
    #[error("document archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("paragraph {paragraph} contains U+{code:04X}, which XML cannot represent")]
    InvalidText { paragraph: usize, code: u32 },
    #[error("invalid config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}
