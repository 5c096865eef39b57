use crate::Item;

/// Orders items into the ranked queue: highest vote score first, earlier
/// submissions breaking ties, item id settling anything left.
///
/// The last tie-break makes the result fully deterministic, so repeated
/// calls against unchanged input never reorder.
pub fn rank(mut items: Vec<Item>) -> Vec<Item> {
    items.sort_by(|a, b| {
        b.votes
            .cmp(&a.votes)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    items
}
