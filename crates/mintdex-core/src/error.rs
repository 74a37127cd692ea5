use crate::types::Mint;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("token fetch failure: {0}")]
    Fetch(String),

    #[error("mint not found: {0}")]
    MintNotFound(Mint),

    #[error("token metadata parse error at line {line}: {message}")]
    MetadataParse { line: usize, message: String },

    #[error("mintlist parse error in {source_name}: {message}")]
    MintlistParse {
        source_name: String,
        message: String,
    },

    #[error("duplicate mintlist name `{name}` from {path}")]
    DuplicateMintlist { name: String, path: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
