//! Literal placeholder substitution for the home page template.
//!
//! The template is a plain HTML document containing `{name}` tokens. There is
//! no template language: every token for which a fetcher produced a
//! [`Fragment::Html`] is replaced by the fragment text, every line containing
//! a token whose fragment is [`Fragment::Omitted`] is dropped, and tokens no
//! fetcher knows about are left in the output verbatim.

use crate::fragment::{Fragment, FragmentSet};

/// The in-memory template document.
#[derive(Debug)]
pub struct Template {
    text: String,
}

impl Template {
    pub fn new(text: String) -> Template {
        Template { text }
    }

    /// Applies `fragments` in their insertion order and returns the rendered
    /// document.
    pub fn render(&self, fragments: &FragmentSet) -> String {
        let mut text = self.text.clone();
        for (name, fragment) in fragments.iter() {
            let token = format!("{{{}}}", name);
            text = match fragment {
                Fragment::Html(html) => text.replace(&token, html),
                Fragment::Omitted => strip_lines_containing(&text, &token),
            };
        }
        text
    }
}

/// Removes every line of `text` containing `token`, keeping the line
/// terminators of the surviving lines.
fn strip_lines_containing(text: &str, token: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.contains(token))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn fragments(entries: &[(&str, Fragment)]) -> FragmentSet {
        let mut set = FragmentSet::new();
        for (name, fragment) in entries {
            set.insert(*name, fragment.clone());
        }
        set
    }

    #[test]
    fn test_render_substitutes_every_occurrence() {
        let template = Template::new("<p>{blog}</p>\n<div>{blog}</div>\n".to_owned());
        let rendered = template.render(&fragments(&[(
            "blog",
            Fragment::Html("<b>hi</b>".to_owned()),
        )]));
        assert_eq!(rendered, "<p><b>hi</b></p>\n<div><b>hi</b></div>\n");
    }

    #[test]
    fn test_render_leaves_unknown_tokens_verbatim() {
        let template = Template::new("{blog}\n{mystery}\n".to_owned());
        let rendered =
            template.render(&fragments(&[("blog", Fragment::Html("post".to_owned()))]));
        assert_eq!(rendered, "post\n{mystery}\n");
    }

    #[test]
    fn test_render_omitted_removes_lines() {
        let template =
            Template::new("<header />\n<section>{github}</section>\n<footer />\n".to_owned());
        let rendered = template.render(&fragments(&[("github", Fragment::Omitted)]));
        assert_eq!(rendered, "<header />\n<footer />\n");
    }

    #[test]
    fn test_render_omitted_removes_every_matching_line() {
        let template = Template::new("{github}\nkeep\n{github} again\n".to_owned());
        let rendered = template.render(&fragments(&[("github", Fragment::Omitted)]));
        assert_eq!(rendered, "keep\n");
    }

    #[test]
    fn test_render_inert_for_absent_tokens() {
        // A fragment whose token never appears must not affect the output,
        // whatever its value.
        let template = Template::new("<p>static</p>\n".to_owned());
        for fragment in [
            Fragment::Html("anything".to_owned()),
            Fragment::Omitted,
        ]
        .iter()
        {
            let rendered = template.render(&fragments(&[("blog", fragment.clone())]));
            assert_eq!(rendered, "<p>static</p>\n");
        }
    }

    #[test]
    fn test_render_last_line_without_terminator() {
        let template = Template::new("keep\n{github}".to_owned());
        let rendered = template.render(&fragments(&[("github", Fragment::Omitted)]));
        assert_eq!(rendered, "keep\n");
    }
}
