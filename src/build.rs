//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output static site: running each data fetcher
//! ([`crate::blog`], [`crate::github`], and friends), substituting the
//! results into the template ([`crate::template`]), and writing the home
//! page, redirect stubs, data files, and static assets to the output
//! directory.

use crate::blog;
use crate::budget;
use crate::client::Client;
use crate::config::Config;
use crate::fetch::Error as FetchError;
use crate::fragment::FragmentSet;
use crate::github;
use crate::local;
use crate::position;
use crate::redirect::{make_redirect_html, redirects, Redirect};
use crate::stackoverflow;
use crate::template::Template;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds the site from a [`Config`] object. Each fetcher runs in a fixed
/// order and any failure aborts the whole build; there is no partial-site
/// fallback. The fetch and render phases are separate from the write phase
/// ([`write_site`]) so the latter can be exercised without the network.
pub fn build_site(config: &Config) -> Result<()> {
    let client = Client::new().map_err(FetchError::Http)?;

    let budget_csv = budget::csv_export(&client, config)?;

    let mut fragments = FragmentSet::new();
    fragments.insert("blog", blog::fragment(&client, config)?);
    fragments.insert("github", github::fragment(&client, config)?);
    fragments.insert("resume", local::contact_fragment(config));
    fragments.insert("linkedin", position::fragment(&client, config)?);
    fragments.insert("stackoverflow", stackoverflow::fragment(&client, config)?);
    fragments.insert("restaurants", budget::restaurants_fragment(&client, config)?);
    fragments.insert("last_updated", local::last_updated_fragment());

    let template = load_template(&config.template_path)?;
    let home_page = template.render(&fragments);

    write_site(
        &config.output_directory,
        &home_page,
        &[("budget.csv", &budget_csv)],
        &redirects(),
        &config.static_directory,
    )
}

/// Writes every output of the build under `output_directory`, recreating it
/// from scratch: the rendered home page, each generated data file under
/// `data/`, a stub page per redirect entry, and the top-level files of
/// `static_directory` copied verbatim.
pub fn write_site(
    output_directory: &Path,
    home_page: &str,
    data_files: &[(&str, &[u8])],
    redirects: &[Redirect],
    static_directory: &Path,
) -> Result<()> {
    rmdir(output_directory)?;
    fs::create_dir_all(output_directory)?;
    fs::write(output_directory.join("index.html"), home_page)?;

    let data_directory = output_directory.join("data");
    fs::create_dir(&data_directory)?;
    for (name, contents) in data_files {
        fs::write(data_directory.join(name), contents)?;
    }

    for redirect in redirects {
        let redirect_directory = output_directory.join(&redirect.path);
        fs::create_dir_all(&redirect_directory)?;
        fs::write(
            redirect_directory.join("index.html"),
            make_redirect_html(&redirect.url),
        )?;
    }

    copy_static(static_directory, output_directory)?;
    Ok(())
}

// Loads the template file contents into a `Template`.
fn load_template(path: &Path) -> Result<Template> {
    let contents = fs::read_to_string(path).map_err(|e| Error::OpenTemplateFile {
        path: path.to_owned(),
        err: e,
    })?;
    Ok(Template::new(contents))
}

/// Copies each file at the top level of `src` into `dst` unmodified.
/// Subdirectories are not descended into.
fn copy_static(src: &Path, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        fs::copy(entry.path(), dst.join(entry.file_name()))?;
    }
    Ok(())
}

fn rmdir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(x) => Ok(x),
        Err(e) => match e.kind() {
            std::io::ErrorKind::NotFound => Ok(()),
            _ => Err(Error::Clean {
                path: dir.to_owned(),
                err: e,
            }),
        },
    }
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building a site. Errors can be during fetching,
/// cleaning the output directory, opening the template file, and other I/O.
#[derive(Debug)]
pub enum Error {
    /// Returned for errors while fetching or decoding external data.
    Fetch(FetchError),

    /// Returned for I/O problems while cleaning the output directory.
    Clean { path: PathBuf, err: std::io::Error },

    /// Returned for I/O problems while opening the template file.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for other I/O errors.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Fetch(err) => err.fmt(f),
            Error::Clean { path, err } => {
                write!(f, "Cleaning directory '{}': {}", path.display(), err)
            }
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::Io(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Fetch(err) => Some(err),
            Error::Clean { path: _, err } => Some(err),
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    /// Converts [`std::io::Error`]s into [`Error`]. This allows us to use the
    /// `?` operator.
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<FetchError> for Error {
    /// Converts [`FetchError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: FetchError) -> Error {
        Error::Fetch(err)
    }
}
