//! Fragments produced without touching the network.

use crate::config::Config;
use crate::fragment::Fragment;
use chrono::Local;

/// The static contact card for the `resume` placeholder.
pub fn contact_fragment(config: &Config) -> Fragment {
    Fragment::Html(format!(
        r#"<p>
<span class="latest">Contact me at
  <a href="mailto:{email}">{email}</a>
</span >
I'm a software engineer who builds highly-scalable developer
tooling.<br />
I'm based in {city}.
</p>
"#,
        email = config.email,
        city = config.city,
    ))
}

pub fn last_updated_fragment() -> Fragment {
    last_updated(&Local::now().format("%Y-%m-%d").to_string())
}

fn last_updated(date: &str) -> Fragment {
    Fragment::Html(format!(
        r#"<p>
<span class="latest">Last updated: {date}</span>
This page is an activity feed of my internet presence, updated once a day.
</p>
"#,
        date = date,
    ))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_last_updated() {
        match last_updated("2021-03-14") {
            Fragment::Html(html) => {
                assert!(html.contains("Last updated: 2021-03-14"));
            }
            Fragment::Omitted => panic!("expected an HTML fragment"),
        }
    }
}
