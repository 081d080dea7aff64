// Top-N ranking with an "Others" rollup and a "Total" row.
//
// Grouping preserves the order in which keys first appear in the input, so
// ties in the descending sort resolve to source order and the output is
// deterministic across runs.
use crate::util::format_percent;
use std::cmp::Ordering;
use std::collections::HashMap;

/// One aggregated group prior to ranking. `description` carries a secondary
/// label column where a view has one (HS code descriptions).
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: String,
    pub description: Option<String>,
    pub value: f64,
}

/// Sum `value` per `(label, description)` key, keeping first-occurrence order.
pub fn sum_groups<I>(items: I) -> Vec<Group>
where
    I: IntoIterator<Item = (String, Option<String>, f64)>,
{
    let mut index: HashMap<(String, Option<String>), usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();
    for (label, description, value) in items {
        let key = (label, description);
        if let Some(&i) = index.get(&key) {
            groups[i].value += value;
        } else {
            index.insert(key.clone(), groups.len());
            groups.push(Group {
                label: key.0,
                description: key.1,
                value,
            });
        }
    }
    groups
}

/// Count occurrences per label. Used where the metric is "number of rows"
/// rather than a summed column.
pub fn count_groups<I>(labels: I) -> Vec<Group>
where
    I: IntoIterator<Item = String>,
{
    sum_groups(labels.into_iter().map(|l| (l, None, 1.0)))
}

/// A finalized summary row. `value` stays numeric; rendering to display
/// strings happens in the view layer, after all arithmetic is done.
#[derive(Debug, Clone)]
pub struct RankedRow {
    pub label: String,
    pub description: Option<String>,
    pub value: f64,
    pub percentage: String,
}

#[derive(Debug, Clone)]
pub struct RankedSummary {
    pub kept: Vec<RankedRow>,
    pub others: RankedRow,
    pub total: RankedRow,
}

impl RankedSummary {
    /// Kept rows followed by the synthetic Others and Total rows.
    pub fn into_rows(self) -> impl Iterator<Item = RankedRow> {
        self.kept.into_iter().chain([self.others, self.total])
    }

    pub fn grand_total(&self) -> f64 {
        self.total.value
    }
}

/// Rank groups descending by value, keep the top `top_n`, and roll everything
/// else into an "Others" row. The trailing "Total" row always reads "100%".
///
/// Percentages are shares of the grand total, each rounded independently to
/// two decimals. `sum(kept) + others == total` holds exactly pre-rounding.
pub fn rank(mut groups: Vec<Group>, top_n: usize) -> RankedSummary {
    groups.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(Ordering::Equal));
    let grand_total: f64 = groups.iter().map(|g| g.value).sum();

    let kept: Vec<RankedRow> = groups
        .into_iter()
        .take(top_n)
        .map(|g| RankedRow {
            percentage: format_percent(g.value, grand_total),
            label: g.label,
            description: g.description,
            value: g.value,
        })
        .collect();

    let kept_sum: f64 = kept.iter().map(|r| r.value).sum();
    let others_value = grand_total - kept_sum;
    let others = RankedRow {
        label: "Others".to_string(),
        description: None,
        value: others_value,
        percentage: format_percent(others_value, grand_total),
    };
    let total = RankedRow {
        label: "Total".to_string(),
        description: None,
        value: grand_total,
        percentage: "100%".to_string(),
    };

    RankedSummary { kept, others, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn by_value(rows: &[(&str, f64)]) -> Vec<Group> {
        sum_groups(
            rows.iter()
                .map(|(label, v)| (label.to_string(), None, *v)),
        )
    }

    #[test]
    fn top_two_with_others_and_total() {
        let groups = by_value(&[
            ("United States", 700.0),
            ("Canada", 200.0),
            ("Mexico", 100.0),
        ]);
        let summary = rank(groups, 2);

        assert_eq!(summary.kept.len(), 2);
        assert_eq!(summary.kept[0].label, "United States");
        assert_eq!(summary.kept[0].value, 700.0);
        assert_eq!(summary.kept[0].percentage, "70.0%");
        assert_eq!(summary.kept[1].label, "Canada");
        assert_eq!(summary.kept[1].percentage, "20.0%");
        assert_eq!(summary.others.value, 100.0);
        assert_eq!(summary.others.percentage, "10.0%");
        assert_eq!(summary.total.value, 1000.0);
        assert_eq!(summary.total.percentage, "100%");
    }

    #[test]
    fn kept_plus_others_equals_grand_total() {
        let groups = by_value(&[("a", 3.0), ("b", 5.0), ("c", 11.0), ("d", 2.0), ("e", 7.0)]);
        let summary = rank(groups, 3);
        let kept_sum: f64 = summary.kept.iter().map(|r| r.value).sum();
        assert_eq!(kept_sum + summary.others.value, summary.grand_total());
    }

    #[test]
    fn others_row_present_even_when_nothing_excluded() {
        let summary = rank(by_value(&[("a", 4.0), ("b", 1.0)]), 10);
        assert_eq!(summary.kept.len(), 2);
        assert_eq!(summary.others.value, 0.0);
        assert_eq!(summary.others.percentage, "0.0%");
        assert_eq!(summary.total.value, 5.0);
    }

    #[test]
    fn empty_input_yields_well_formed_summary() {
        let summary = rank(Vec::new(), 5);
        assert!(summary.kept.is_empty());
        assert_eq!(summary.others.value, 0.0);
        assert_eq!(summary.others.percentage, "0.0%");
        assert_eq!(summary.total.value, 0.0);
        assert_eq!(summary.total.percentage, "100%");
    }

    #[test]
    fn zero_sum_groups_do_not_divide_by_zero() {
        let summary = rank(by_value(&[("a", 0.0), ("b", 0.0)]), 1);
        assert_eq!(summary.kept[0].percentage, "0.0%");
        assert_eq!(summary.others.percentage, "0.0%");
    }

    #[test]
    fn ties_keep_first_occurrence_order() {
        let groups = by_value(&[("first", 5.0), ("second", 5.0), ("third", 5.0)]);
        let summary = rank(groups, 3);
        let labels: Vec<&str> = summary.kept.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["first", "second", "third"]);
    }

    #[test]
    fn grouping_sums_repeated_keys() {
        let groups = sum_groups(vec![
            ("x".to_string(), None, 1.0),
            ("y".to_string(), None, 2.0),
            ("x".to_string(), None, 3.0),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "x");
        assert_eq!(groups[0].value, 4.0);
    }

    #[test]
    fn counting_is_one_unit_per_item() {
        let groups = count_groups(vec!["a".to_string(), "b".to_string(), "a".to_string()]);
        assert_eq!(groups[0].value, 2.0);
        assert_eq!(groups[1].value, 1.0);
    }
}
