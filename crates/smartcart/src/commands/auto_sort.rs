//! Implementation of the `smartcart auto-sort` command

use smartcart_core::RecategorizeOutcome;
use smartcart_core::interaction::{InteractionAdapter, with_progress};
use tracing::info;

use crate::context::AppContext;
use crate::output::{JsonIssue, JsonResponse, SortData};

/// Run the auto-sort command: ask the categorizer for every distinct name
pub fn run_auto_sort(ctx: &mut AppContext) -> anyhow::Result<i32> {
    if ctx.store.is_empty() {
        if ctx.output.json {
            JsonResponse::ok(
                "auto-sort",
                SortData {
                    changed: 0,
                    categorized: false,
                },
            )
            .print();
        } else {
            ctx.adapter.print_info(&ctx.t("app.empty.title"));
        }
        return Ok(0);
    }

    let names = ctx.store.unique_names();
    let categorizer = &ctx.categorizer;
    let outcome = if categorizer.is_configured() {
        let spinner_message = ctx.t("spinner.autoSort");
        with_progress(
            &ctx.adapter,
            &spinner_message,
            || categorizer.recategorize_batch(names.as_slice()),
            |outcome| !outcome.is_unchanged(),
        )
    } else {
        categorizer.recategorize_batch(names.as_slice())
    };

    let unchanged_reason = match &outcome {
        RecategorizeOutcome::Unchanged { reason } => Some(ctx.reason_text(reason)),
        RecategorizeOutcome::Categorized(_) => None,
    };

    let mapping = outcome.into_mapping();
    let changed = if mapping.is_empty() {
        0
    } else {
        ctx.store.recategorize(&mapping)
    };
    info!(changed, "auto-sort finished");

    if ctx.output.json {
        let data = SortData {
            changed,
            categorized: unchanged_reason.is_none(),
        };
        match unchanged_reason {
            Some(reason) => JsonResponse::ok_with_issues(
                "auto-sort",
                data,
                vec![JsonIssue::warning("W001", reason)],
            )
            .print(),
            None => JsonResponse::ok("auto-sort", data).print(),
        }
        return Ok(0);
    }

    if let Some(reason) = unchanged_reason {
        ctx.adapter
            .print_warning(&ctx.t_with("message.sortFallback", &[("reason", reason.as_str())]));
    }
    if changed == 0 {
        ctx.adapter.print_info(&ctx.t("message.unchanged"));
    } else {
        let count = changed.to_string();
        ctx.adapter
            .print_success(&ctx.t_with("message.sorted", &[("count", count.as_str())]));
    }

    Ok(0)
}
