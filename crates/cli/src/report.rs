use std::error;
use std::fmt;
use std::io;

pub type Report<T> = Result<T, Error>;

/// An error with a human-readable message and, where one exists, the
/// underlying I/O error that caused it.
#[derive(Debug)]
pub struct Error {
    message: String,
    source: Option<io::Error>,
}

impl Error {
    pub fn message<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Error {
            message: message.into(),
            source: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &(dyn error::Error + 'static))
    }
}

/// Attach a message to a fallible operation's error.
pub trait Context<T, E> {
    fn context(self, message: &str) -> Report<T>
    where
        E: Into<io::Error>;

    fn with_context<F, M>(self, f: F) -> Report<T>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>;
}

impl<T, E> Context<T, E> for Result<T, E> {
    fn context(self, message: &str) -> Report<T>
    where
        E: Into<io::Error>,
    {
        self.map_err(|err| Error {
            message: message.into(),
            source: Some(err.into()),
        })
    }

    fn with_context<F, M>(self, f: F) -> Report<T>
    where
        E: Into<io::Error>,
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.map_err(|err| Error {
            message: f().into(),
            source: Some(err.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_the_source() {
        let err: Report<()> = Err(io::Error::new(io::ErrorKind::NotFound, "enoent"))
            .context("failed to read index.html");

        assert_eq!(
            err.unwrap_err().to_string(),
            "failed to read index.html: enoent"
        );
    }

    #[test]
    fn plain_messages_display_alone() {
        assert_eq!(Error::message("no such port").to_string(), "no such port");
    }
}
