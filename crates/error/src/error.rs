pub type Result<T> = std::result::Result<T, Error>;
impl<T> From<Error> for Result<T> {
    fn from(e: Error) -> Self {
        Err(e)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Invalid user input, which typically includes bad command-line arguments or trace headers.
    InvalidInput(String),
    /// An IO error has occurred while reading a trace.
    IO(String),
    /// The requested replacement policy is not registered.
    UnknownPolicy(String),
    /// A trace referenced a virtual page outside `[0, num_pages)`.
    PageOutOfRange { page: i64, num_pages: usize },
}

impl std::error::Error for Error {}
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Error::IO(msg) => write!(f, "IO error: {}", msg),
            Error::UnknownPolicy(name) => {
                write!(f, "Unknown paging algorithm '{}'", name)
            }
            Error::PageOutOfRange { page, num_pages } => {
                write!(
                    f,
                    "Invalid access: page {} is outside the address space of {} pages",
                    page, num_pages
                )
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IO(e.to_string())
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(e: std::num::ParseIntError) -> Self {
        Error::InvalidInput(e.to_string())
    }
}
