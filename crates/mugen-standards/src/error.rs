use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StandardsError {
    #[error("resource directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("schema file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse XML {path}: {source}")]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    #[error("{path}: missing <{element}> element")]
    MissingElement {
        path: PathBuf,
        element: &'static str,
    },

    #[error("{path}: <{element}> is missing attribute '{attribute}'")]
    MissingAttribute {
        path: PathBuf,
        element: &'static str,
        attribute: &'static str,
    },

    #[error("{path}: invalid value {value:?} for {what}")]
    InvalidValue {
        path: PathBuf,
        what: &'static str,
        value: String,
    },
}

impl StandardsError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, StandardsError>;
