//! Completion statistics and chart data

use serde::Serialize;

use crate::i18n::Translator;
use crate::types::{Item, category_key};

/// Slice colours, cycled when there are more categories than colours
pub const CHART_PALETTE: [&str; 9] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#06b6d4", "#84cc16",
    "#64748b",
];

/// Derived completion statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub progress_percent: u32,
    /// `(category, count)` in first-seen order; order carries no meaning
    pub category_counts: Vec<(String, usize)>,
}

impl Stats {
    pub fn compute(items: &[Item]) -> Self {
        let total = items.len();
        let completed = items.iter().filter(|item| item.checked).count();
        let progress_percent = if total == 0 {
            0
        } else {
            (completed as f64 / total as f64 * 100.0).round() as u32
        };

        let mut category_counts: Vec<(String, usize)> = Vec::new();
        for item in items {
            match category_counts
                .iter_mut()
                .find(|(category, _)| *category == item.category)
            {
                Some((_, count)) => *count += 1,
                None => category_counts.push((item.category.clone(), 1)),
            }
        }

        Self {
            total,
            completed,
            progress_percent,
            category_counts,
        }
    }

    pub fn remaining(&self) -> usize {
        self.total - self.completed
    }
}

/// One slice of the category chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    /// Localized category label
    pub name: String,
    pub value: usize,
    pub fill: &'static str,
}

/// Chart slices with localized labels and palette colours
pub fn chart_slices(stats: &Stats, translator: &Translator) -> Vec<ChartSlice> {
    stats
        .category_counts
        .iter()
        .enumerate()
        .map(|(index, (category, count))| ChartSlice {
            name: translator.t(&category_key(category)),
            value: *count,
            fill: CHART_PALETTE[index % CHART_PALETTE.len()],
        })
        .collect()
}
