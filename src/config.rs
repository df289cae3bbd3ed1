use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const PROJECT_FILE: &str = "site.yaml";

/// Environment variable holding the YNAB personal access token. Required
/// because the budget fetchers can't authenticate without it.
const API_KEY_VAR: &str = "YNAB_API_KEY";

/// Environment variable naming a pre-fetched transactions JSON document to
/// use instead of calling the YNAB transactions endpoint.
const TRANSACTIONS_FILE_VAR: &str = "YNAB_TRANSACTIONS_FILE";

fn default_template() -> PathBuf {
    PathBuf::from("index.template.html")
}

fn default_static_directory() -> PathBuf {
    PathBuf::from("_static")
}

fn default_budget_id() -> String {
    "last-used".to_owned()
}

/// The `site.yaml` project file as it appears on disk.
#[derive(Deserialize)]
struct Project {
    pub city: String,
    pub email: String,
    pub blog_feed_url: String,
    pub github_user: String,
    pub resume_url: String,
    pub stackoverflow_user_id: u64,
    pub budget: ProjectBudget,

    #[serde(default = "default_template")]
    pub template: PathBuf,

    #[serde(default = "default_static_directory")]
    pub static_directory: PathBuf,
}

#[derive(Deserialize)]
struct ProjectBudget {
    #[serde(default = "default_budget_id")]
    pub budget_id: String,
    pub category_names: Vec<String>,
}

/// Everything the budget fetchers need. The API key comes from the
/// environment; the rest comes from the project file.
pub struct BudgetConfig {
    pub api_key: String,
    pub budget_id: String,
    pub category_names: Vec<String>,
    pub transactions_file: Option<PathBuf>,
}

/// The fully-resolved configuration threaded through the build. All
/// environment access happens while constructing this; the fetchers only
/// ever see the resulting struct.
pub struct Config {
    pub city: String,
    pub email: String,
    pub blog_feed_url: String,
    pub github_user: String,
    pub resume_url: String,
    pub stackoverflow_user_id: u64,
    pub budget: BudgetConfig,
    pub template_path: PathBuf,
    pub static_directory: PathBuf,
    pub output_directory: PathBuf,
}

impl Config {
    /// Locates `site.yaml` in `dir` or the nearest parent directory and loads
    /// it.
    pub fn from_directory(dir: &Path, output_directory: &Path) -> Result<Config> {
        let path = dir.join(PROJECT_FILE);
        if path.exists() {
            Config::from_project_file(&path, output_directory)
        } else {
            match dir.parent() {
                Some(parent) => Config::from_directory(parent, output_directory),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    PROJECT_FILE
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path, output_directory: &Path) -> Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Opening project file `{}`", path.display()))?;
        let project: Project = serde_yaml::from_str(&contents)
            .with_context(|| format!("Parsing project file `{}`", path.display()))?;
        let project_root = path
            .parent()
            .ok_or_else(|| {
                anyhow!(
                    "Can't get parent directory for provided project file path '{:?}'",
                    path
                )
            })?
            .to_owned();

        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| anyhow!("{} must be set to a YNAB personal access token", API_KEY_VAR))?;
        let transactions_file = std::env::var_os(TRANSACTIONS_FILE_VAR).map(PathBuf::from);

        Ok(Config {
            city: project.city,
            email: project.email,
            blog_feed_url: project.blog_feed_url,
            github_user: project.github_user,
            resume_url: project.resume_url,
            stackoverflow_user_id: project.stackoverflow_user_id,
            budget: BudgetConfig {
                api_key,
                budget_id: project.budget.budget_id,
                category_names: project.budget.category_names,
                transactions_file,
            },
            template_path: project_root.join(project.template),
            static_directory: project_root.join(project.static_directory),
            output_directory: output_directory.to_owned(),
        })
    }
}
