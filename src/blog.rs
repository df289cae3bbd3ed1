//! The latest-post fragment, taken from the blog's Atom feed.

use crate::client::Client;
use crate::config::Config;
use crate::fetch::{Error, Result};
use crate::fragment::Fragment;
use atom_syndication::{Entry, Feed};

pub fn fragment(client: &Client, config: &Config) -> Result<Fragment> {
    let bytes = client
        .get(&config.blog_feed_url)
        .send()?
        .error_for_status()?
        .bytes()?;
    let feed = Feed::read_from(bytes.as_ref())?;
    let entry = feed.entries.first().ok_or(Error::MissingField("entry"))?;
    Ok(Fragment::Html(render(entry)?))
}

fn render(entry: &Entry) -> Result<String> {
    // Entries are required to carry `updated`; `published` is what we
    // actually want but is optional in Atom.
    let date = entry
        .published
        .as_ref()
        .unwrap_or(&entry.updated)
        .format("%b %d, %Y");
    let tags = entry
        .categories
        .iter()
        .map(|category| category.term.as_str())
        .collect::<Vec<&str>>()
        .join(" &bull; ");
    let link = entry
        .links
        .first()
        .map(|link| link.href.as_str())
        .ok_or(Error::MissingField("link"))?;
    Ok(format!(
        r#"<p>
<span class="latest">Latest post</span>
<span class="latest">{date} &bull; {tags}</span>
<a href="{link}">{title}</a><br />
</p>
"#,
        date = date,
        tags = tags,
        link = link,
        title = entry.title.as_str(),
    ))
}
