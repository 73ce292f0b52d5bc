use super::types::*;
use crate::fanout::types::PerInstanceResult;

/// Merges per-instance results into one view.
///
/// Pure: the same input always yields the same view.
///
/// - `Group` drops instances without items and keeps the rest in input order.
/// - `Flatten` concatenates items in input order, keeping each instance's own
///   ordering (ranking order for search, most recent first for recents).
pub fn aggregate<T: Clone>(
    results: &[PerInstanceResult<T>],
    mode: AggregationMode,
) -> AggregatedView<T> {
    match mode {
        AggregationMode::Flatten => AggregatedView::Flat(
            results
                .iter()
                .flat_map(|r| {
                    r.items.iter().map(|item| OwnedItem {
                        item: item.clone(),
                        instance: r.instance.clone(),
                    })
                })
                .collect(),
        ),
        AggregationMode::Group => {
            let groups: Vec<InstanceGroup<T>> = results
                .iter()
                .filter(|r| !r.items.is_empty())
                .map(|r| InstanceGroup {
                    instance: r.instance.clone(),
                    items: r.items.clone(),
                })
                .collect();
            let total_count = groups.iter().map(|g| g.items.len()).sum();

            AggregatedView::Grouped {
                groups,
                total_count,
            }
        }
    }
}
