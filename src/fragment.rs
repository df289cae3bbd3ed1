//! Defines the [`Fragment`] type, the unit of content produced by the data
//! fetchers, and [`FragmentSet`], the ordered collection of named fragments
//! that gets substituted into the template.

/// A named piece of content destined for a `{name}` placeholder in the
/// template. A fetcher either produces rendered HTML or explicitly declares
/// the section omitted, in which case the renderer removes the placeholder's
/// lines from the output instead of substituting into them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fragment {
    /// A fully-rendered HTML snippet, substituted verbatim.
    Html(String),

    /// An explicit "leave this section out" marker.
    Omitted,
}

/// An ordered collection of (placeholder name, [`Fragment`]) pairs.
///
/// Insertion order is preserved, and inserting under a name that is already
/// present replaces the earlier entry, so merging fetcher results in a fixed
/// order gives deterministic "later fetcher wins" semantics.
#[derive(Debug, Default)]
pub struct FragmentSet {
    entries: Vec<(String, Fragment)>,
}

impl FragmentSet {
    pub fn new() -> FragmentSet {
        FragmentSet {
            entries: Vec::new(),
        }
    }

    /// Inserts `fragment` under `name`, replacing any earlier entry with the
    /// same name.
    pub fn insert<S: Into<String>>(&mut self, name: S, fragment: Fragment) {
        let name = name.into();
        self.entries.retain(|(existing, _)| existing != &name);
        self.entries.push((name, fragment));
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, fragment)| fragment)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.entries
            .iter()
            .map(|(name, fragment)| (name.as_str(), fragment))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let mut fragments = FragmentSet::new();
        fragments.insert("blog", Fragment::Html("b".to_owned()));
        fragments.insert("github", Fragment::Html("g".to_owned()));
        fragments.insert("resume", Fragment::Omitted);

        let names: Vec<&str> = fragments.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["blog", "github", "resume"]);
    }

    #[test]
    fn test_later_insert_wins() {
        let mut fragments = FragmentSet::new();
        fragments.insert("blog", Fragment::Html("first".to_owned()));
        fragments.insert("github", Fragment::Html("g".to_owned()));
        fragments.insert("blog", Fragment::Html("second".to_owned()));

        assert_eq!(
            fragments.get("blog"),
            Some(&Fragment::Html("second".to_owned()))
        );
        assert_eq!(fragments.len(), 2);

        // The replacement takes the later position, not the earlier one.
        let names: Vec<&str> = fragments.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["github", "blog"]);
    }

    #[test]
    fn test_get_missing() {
        let fragments = FragmentSet::new();
        assert_eq!(fragments.get("blog"), None);
    }
}
