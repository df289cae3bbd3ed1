//! The error type shared by the data fetchers.
//!
//! The fetchers all fail in the same handful of ways (transport problems,
//! non-success statuses, responses missing an expected field, a named lookup
//! coming up empty), so they share one error enum rather than each carrying
//! its own. No fetcher recovers from an error; everything propagates to
//! [`crate::build::build_site`] and aborts the run.

use std::fmt;

/// The result of a fallible fetch operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error while fetching or decoding data from an external
/// source.
#[derive(Debug)]
pub enum Error {
    /// Returned for transport failures and non-success HTTP statuses.
    Http(reqwest::Error),

    /// Returned when the blog feed is not valid Atom.
    Feed(atom_syndication::Error),

    /// Returned when a JSON response doesn't decode into the expected shape.
    Json(serde_json::Error),

    /// Returned for errors writing the CSV export.
    Csv(csv::Error),

    /// Returned when a date string in a response doesn't parse.
    DateParse(chrono::ParseError),

    /// Returned when a response decodes but is missing an expected item.
    MissingField(&'static str),

    /// Returned when a scraped page doesn't contain an expected element.
    ElementNotFound(&'static str),

    /// Returned when a configured budget category name has no match.
    CategoryNotFound(String),

    /// Returned for I/O errors reading local data files.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Http(err) => err.fmt(f),
            Error::Feed(err) => err.fmt(f),
            Error::Json(err) => err.fmt(f),
            Error::Csv(err) => err.fmt(f),
            Error::DateParse(err) => err.fmt(f),
            Error::MissingField(field) => {
                write!(f, "Response is missing expected field `{}`", field)
            }
            Error::ElementNotFound(element) => {
                write!(f, "Could not find element `{}` in scraped page", element)
            }
            Error::CategoryNotFound(name) => {
                write!(f, "Could not find budget category: {}", name)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Feed(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Csv(err) => Some(err),
            Error::DateParse(err) => Some(err),
            Error::MissingField(_) => None,
            Error::ElementNotFound(_) => None,
            Error::CategoryNotFound(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

impl From<reqwest::Error> for Error {
    /// Converts [`reqwest::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator for HTTP calls.
    fn from(err: reqwest::Error) -> Error {
        Error::Http(err)
    }
}

impl From<atom_syndication::Error> for Error {
    /// Converts feed-parsing errors into [`Error`]. This allows us to use the
    /// `?` operator when reading the blog feed.
    fn from(err: atom_syndication::Error) -> Error {
        Error::Feed(err)
    }
}

impl From<serde_json::Error> for Error {
    /// Converts [`serde_json::Error`]s into [`Error`]. This allows us to use
    /// the `?` operator when decoding API responses.
    fn from(err: serde_json::Error) -> Error {
        Error::Json(err)
    }
}

impl From<csv::Error> for Error {
    /// Converts [`csv::Error`]s into [`Error`]. This allows us to use the `?`
    /// operator when writing the CSV export.
    fn from(err: csv::Error) -> Error {
        Error::Csv(err)
    }
}

impl From<chrono::ParseError> for Error {
    /// Converts [`chrono::ParseError`]s into [`Error`]. This allows us to use
    /// the `?` operator when parsing response dates.
    fn from(err: chrono::ParseError) -> Error {
        Error::DateParse(err)
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator when reading local data files.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}
