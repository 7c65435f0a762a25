//! Implementation of the `smartcart stats` command

use owo_colors::OwoColorize;
use smartcart_core::interaction::InteractionAdapter;
use smartcart_core::{ChartSlice, Stats, chart_slices};

use crate::colors::COLORS;
use crate::context::AppContext;
use crate::output::{JsonResponse, StatsData};

/// Width of the progress bar and the longest chart bar
const BAR_WIDTH: usize = 30;

/// Run the stats command
pub fn run_stats(ctx: &AppContext) -> anyhow::Result<i32> {
    let stats = Stats::compute(ctx.store.items());
    let chart = chart_slices(&stats, &ctx.translator);

    if ctx.output.json {
        JsonResponse::ok("stats", StatsData { stats, chart }).print();
        return Ok(0);
    }
    if !ctx.human() {
        return Ok(0);
    }

    ctx.adapter.print_header(&ctx.t("stats.title"));
    println!();

    let filled = progress_cells(stats.progress_percent, BAR_WIDTH);
    println!(
        "{}  {}{} {}%",
        ctx.t("stats.progress"),
        "█".repeat(filled).style(COLORS.success),
        "░".repeat(BAR_WIDTH - filled).style(COLORS.muted),
        stats.progress_percent
    );
    let completed = stats.completed.to_string();
    let total = stats.total.to_string();
    println!(
        "{}",
        ctx.t_with(
            "stats.completedOf",
            &[("completed", completed.as_str()), ("total", total.as_str())]
        )
        .style(COLORS.muted)
    );
    if stats.remaining() > 0 {
        let remaining = stats.remaining().to_string();
        println!(
            "{}",
            ctx.t_with("stats.remaining", &[("count", remaining.as_str())])
                .style(COLORS.muted)
        );
    }
    println!();

    println!("{}", ctx.t("stats.byCategory").bold());
    if chart.is_empty() {
        println!("  {}", ctx.t("stats.empty").style(COLORS.muted));
        return Ok(0);
    }
    print_chart(&chart);

    Ok(0)
}

/// Number of filled cells for a percentage
fn progress_cells(percent: u32, width: usize) -> usize {
    (percent.min(100) as usize * width) / 100
}

/// Bar length for a slice, scaled to the largest; never zero for non-empty slices
fn bar_len(value: usize, max: usize, width: usize) -> usize {
    if value == 0 || max == 0 {
        return 0;
    }
    ((value * width) / max).max(1)
}

fn print_chart(chart: &[ChartSlice]) {
    let max = chart.iter().map(|slice| slice.value).max().unwrap_or(0);
    let label_width = chart
        .iter()
        .map(|slice| slice.name.chars().count())
        .max()
        .unwrap_or(0);

    for slice in chart {
        let padding = label_width - slice.name.chars().count();
        println!(
            "  {}{}  {} {}",
            slice.name,
            " ".repeat(padding),
            "■".repeat(bar_len(slice.value, max, BAR_WIDTH))
                .style(COLORS.active),
            slice.value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_cells() {
        assert_eq!(progress_cells(0, 30), 0);
        assert_eq!(progress_cells(50, 30), 15);
        assert_eq!(progress_cells(100, 30), 30);
        assert_eq!(progress_cells(150, 30), 30);
    }

    #[test]
    fn test_bar_len_scales_to_max() {
        assert_eq!(bar_len(10, 10, 30), 30);
        assert_eq!(bar_len(5, 10, 30), 15);
        assert_eq!(bar_len(1, 100, 30), 1);
        assert_eq!(bar_len(0, 10, 30), 0);
    }
}
