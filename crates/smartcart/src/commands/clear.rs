//! Implementation of the `smartcart clear` and `smartcart clear-completed` commands
//!
//! Both are destructive and need confirmation unless `--yes` is given.
//! Declining leaves the list untouched.

use smartcart_core::SmartcartError;
use smartcart_core::interaction::InteractionAdapter;
use tracing::info;

use crate::context::AppContext;
use crate::output::{ClearData, JsonResponse};

/// Ask for confirmation unless `yes` was passed
fn confirmed(ctx: &AppContext, yes: bool, prompt_key: &str) -> anyhow::Result<bool> {
    if yes {
        return Ok(true);
    }
    let answer = ctx
        .adapter
        .ask_confirm(&ctx.t(prompt_key), false)
        .map_err(SmartcartError::from)?;
    Ok(answer)
}

fn report(ctx: &AppContext, command: &str, data: ClearData, message: String) {
    if ctx.output.json {
        JsonResponse::ok(command, data).print();
    } else if data.confirmed {
        ctx.adapter.print_success(&message);
    } else {
        ctx.adapter.print_info(&message);
    }
}

/// Run the clear command
pub fn run_clear(ctx: &mut AppContext, yes: bool) -> anyhow::Result<i32> {
    if !confirmed(ctx, yes, "dialog.clearList")? {
        let message = ctx.t("message.aborted");
        report(
            ctx,
            "clear",
            ClearData {
                removed: 0,
                confirmed: false,
            },
            message,
        );
        return Ok(0);
    }

    let removed = ctx.store.len();
    ctx.store.clear();
    info!(removed, "cleared list");

    let message = ctx.t("message.cleared");
    report(
        ctx,
        "clear",
        ClearData {
            removed,
            confirmed: true,
        },
        message,
    );
    Ok(0)
}

/// Run the clear-completed command
pub fn run_clear_completed(ctx: &mut AppContext, yes: bool) -> anyhow::Result<i32> {
    if !ctx.store.has_completed() {
        let message = ctx.t("message.nothingCompleted");
        report(
            ctx,
            "clear-completed",
            ClearData {
                removed: 0,
                confirmed: true,
            },
            message,
        );
        return Ok(0);
    }

    if !confirmed(ctx, yes, "dialog.clearCompleted")? {
        let message = ctx.t("message.aborted");
        report(
            ctx,
            "clear-completed",
            ClearData {
                removed: 0,
                confirmed: false,
            },
            message,
        );
        return Ok(0);
    }

    let removed = ctx.store.clear_completed();
    info!(removed, "cleared completed items");

    let count = removed.to_string();
    let message = ctx.t_with("message.clearedCompleted", &[("count", count.as_str())]);
    report(
        ctx,
        "clear-completed",
        ClearData {
            removed,
            confirmed: true,
        },
        message,
    );
    Ok(0)
}
