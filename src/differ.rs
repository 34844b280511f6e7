//! Paragraph-level diffing for incremental re-rendering.
//!
//! Two paragraph lists are compared by their longest common prefix and,
//! within what remains, their longest common suffix. Only the middle of the
//! new list needs to be parsed and rendered again.

use std::ops::Range;

/// The split of two paragraph lists into common ends and changed middles.
///
/// `old == common_prefix ++ changed_old ++ common_suffix`, and likewise for
/// `new`. The prefix is maximal; the suffix is maximal among those that do
/// not overlap it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRecord<'a> {
    pub common_prefix: &'a [String],
    pub common_suffix: &'a [String],
    pub changed_old: &'a [String],
    pub changed_new: &'a [String],
}

impl DiffRecord<'_> {
    /// Index span of the changed middle in the new list.
    pub fn changed_range(&self) -> Range<usize> {
        let start = self.common_prefix.len();
        start..start + self.changed_new.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.changed_old.is_empty() && self.changed_new.is_empty()
    }
}

/// Compare two paragraph lists.
pub fn diff<'a>(old: &'a [String], new: &'a [String]) -> DiffRecord<'a> {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let max_suffix = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();

    DiffRecord {
        common_prefix: &new[..prefix],
        common_suffix: &new[new.len() - suffix..],
        changed_old: &old[prefix..old.len() - suffix],
        changed_new: &new[prefix..new.len() - suffix],
    }
}

/// Splice freshly rendered middle paragraphs between the reused renders of
/// the common prefix and suffix.
///
/// `render` receives the changed paragraphs of the new list and must return
/// one rendered string per paragraph.
pub fn differential_render<F>(
    render: F,
    diff: &DiffRecord<'_>,
    rendered_old: &[String],
) -> Vec<String>
where
    F: FnOnce(&[String]) -> Vec<String>,
{
    let prefix = leading(rendered_old, diff.common_prefix.len());
    let suffix = trailing(rendered_old, diff.common_suffix.len());
    let middle = render(diff.changed_new);

    let mut rendered = Vec::with_capacity(prefix.len() + middle.len() + suffix.len());
    rendered.extend_from_slice(prefix);
    rendered.extend(middle);
    rendered.extend_from_slice(suffix);
    rendered
}

/// Keep the ids of the common ends and mint new ones for the middle.
///
/// Returns the id list and the span of fresh ids, `None` when nothing changed.
pub fn differential_ids(
    prefix: &str,
    seed: u64,
    diff: &DiffRecord<'_>,
    old_ids: &[String],
) -> (Vec<String>, Option<Range<usize>>) {
    let range = diff.changed_range();
    let mut ids = leading(old_ids, diff.common_prefix.len()).to_vec();
    ids.extend(range.clone().map(|index| make_id(prefix, seed, index)));
    ids.extend_from_slice(trailing(old_ids, diff.common_suffix.len()));

    let fresh = if range.is_empty() { None } else { Some(range) };
    (ids, fresh)
}

/// Mint a paragraph id: `"{prefix}.{seed}.{index}"`.
pub fn make_id(prefix: &str, seed: u64, index: usize) -> String {
    format!("{}.{}.{}", prefix, seed, index)
}

fn leading<T>(items: &[T], n: usize) -> &[T] {
    &items[..n.min(items.len())]
}

fn trailing<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}
