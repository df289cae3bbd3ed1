//! The current-position fragment, scraped out of the resume site's HTML.
//!
//! The resume site marks each position with a `job` class and tags the
//! employer, description, and date range with corresponding classes. The
//! first `job` element is the current one. The LinkedIn API doesn't expose
//! this information without partner-program approval, so scraping the resume
//! is the next best source.

use crate::client::Client;
use crate::config::Config;
use crate::fetch::{Error, Result};
use crate::fragment::Fragment;
use scraper::{ElementRef, Html, Selector};

struct Position {
    employer: String,
    description: String,
    date: String,
}

pub fn fragment(client: &Client, config: &Config) -> Result<Fragment> {
    let text = client
        .get(&config.resume_url)
        .send()?
        .error_for_status()?
        .text()?;
    let position = extract_current_position(&text)?;
    Ok(Fragment::Html(render(&position)))
}

fn extract_current_position(html: &str) -> Result<Position> {
    let document = Html::parse_document(html);
    let job_selector = Selector::parse(".job").unwrap();
    let job = document
        .select(&job_selector)
        .next()
        .ok_or(Error::ElementNotFound("job"))?;
    Ok(Position {
        employer: class_text(&job, ".job-employer", "job-employer")?,
        description: class_text(&job, ".job-description", "job-description")?,
        date: class_text(&job, ".job-date", "job-date")?,
    })
}

fn class_text(element: &ElementRef, selector: &str, name: &'static str) -> Result<String> {
    let selector = Selector::parse(selector).unwrap();
    let found = element
        .select(&selector)
        .next()
        .ok_or(Error::ElementNotFound(name))?;
    Ok(found.text().collect::<String>().trim().to_owned())
}

fn render(position: &Position) -> String {
    format!(
        r#"<p>
<span class="latest">Current position</span>
{description} @ {employer}<br />
{date}
</p>
"#,
        description = position.description,
        employer = position.employer,
        date = position.date,
    )
}
