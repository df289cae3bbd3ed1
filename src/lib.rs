//! The library code for the `presence` site generator, which builds a
//! personal homepage out of activity snippets fetched from around the web.
//! The architecture can be generally broken down into three distinct steps:
//!
//! 1. Fetching a fragment of rendered HTML from each external source (the
//!    blog's Atom feed, the GitHub events API, the resume site, the Stack
//!    Exchange API, the YNAB budgeting API)
//! 2. Substituting the fragments into the `{name}` placeholders of the home
//!    page template ([`crate::template`])
//! 3. Writing the output site to disk ([`crate::build`]): the home page, a
//!    stub page per redirect entry, generated data files, and static assets
//!
//! The fetchers are leaves: each produces its fragment independently and
//! nothing depends on them except the orchestration in
//! [`crate::build::build_site`], which runs them in a fixed order and merges
//! their results with deterministic later-wins semantics
//! ([`crate::fragment::FragmentSet`]). Any fetcher failure aborts the whole
//! build; the only soft path is a fetcher explicitly declaring its section
//! omitted, which the renderer honors by dropping the placeholder's lines.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod blog;
pub mod budget;
pub mod build;
pub mod client;
pub mod config;
pub mod fetch;
pub mod fragment;
pub mod github;
pub mod local;
pub mod position;
pub mod redirect;
pub mod stackoverflow;
pub mod template;
