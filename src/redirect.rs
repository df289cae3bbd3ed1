//! Short redirect paths for content that used to live on this domain.
//!
//! Each entry becomes a directory in the output site containing a stub
//! `index.html` that immediately forwards the visitor to the canonical
//! location.

/// A short path on this site and the absolute URL it forwards to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub path: String,
    pub url: String,
}

const BLOG_URL: &str = "https://blog.waleedkhan.name/";

const BLOG_ARTICLES: &[&str] = &[
    "will-i-ever-use-this",
    "steno-journal",
    "steno-adventures-part-1",
    "steno-adventures-part-2",
    "dot-name-email-address",
    "pyqt-designer",
    "messenger-conversation-macros",
    "parsing-contextual-keywords",
    "union-vs-sum-types",
    "data-comprehension-syntaxes",
    "my-steno-system",
    "getting-a-job-in-pl",
    "ocaml-file-extensions",
    "monotonicity",
    "mail-server",
    "lan-adapter",
    "smash-bros-parabola-rule",
    "smash-training-retrospective",
    "rust-modules-for-python-users",
];

const EECS281_URL: &str = "https://eecs281.waleedkhan.name/";

const EECS281_ARTICLES: &[&str] = &[
    "sublime-clang",
    "from-eecs-183-and-280",
    "painless-automated-testing",
    "code-deduplication",
    "terminal-tips-and-tricks",
    "dealing-with-caen",
];

const RESUME_URL: &str = "https://resume.waleedkhan.name/";

/// Builds the full redirect table: a bare parent redirect per section, one
/// entry per article, and the one-off resume shortcut. Paths are unique;
/// were a path ever repeated, the later entry would win, since the site
/// assembler writes entries in order.
pub fn redirects() -> Vec<Redirect> {
    let mut redirects = Vec::new();
    redirects.extend(section_redirects("blog", BLOG_URL, BLOG_ARTICLES));
    redirects.extend(section_redirects("281", EECS281_URL, EECS281_ARTICLES));
    redirects.push(Redirect {
        path: "resume".to_owned(),
        url: RESUME_URL.to_owned(),
    });
    redirects
}

fn section_redirects(section: &str, base_url: &str, articles: &[&str]) -> Vec<Redirect> {
    let mut redirects = vec![Redirect {
        path: section.to_owned(),
        url: base_url.to_owned(),
    }];
    for article in articles {
        redirects.push(Redirect {
            path: format!("{}/{}", section, article),
            url: format!("{}{}/", base_url, article),
        });
    }
    redirects
}

/// Renders the stub page for a redirect: a zero-delay meta-refresh plus a
/// canonical link, both pointing at `url`.
pub fn make_redirect_html(url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<head>
<meta http-equiv="refresh" content="0; url={url}">
<link rel="canonical" href="{url}" />
</head>
<body>
<p>This page has moved to <a href="{url}">{url}</a>.
</body>
"#,
        url = url,
    )
}
