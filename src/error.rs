use std::fmt;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// The PDF could not be parsed or serialized.
    Pdf(String),
    /// The PDF parsed but is not a usable single-page form template.
    InvalidTemplate(String),
    DuplicateField(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "{e}"),
            Error::Pdf(msg) => write!(f, "PDF error: {msg}"),
            Error::InvalidTemplate(msg) => write!(f, "invalid form template: {msg}"),
            Error::DuplicateField(name) => write!(f, "duplicate form field name: {name}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<lopdf::Error> for Error {
    fn from(e: lopdf::Error) -> Self {
        Error::Pdf(e.to_string())
    }
}
