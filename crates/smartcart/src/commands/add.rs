//! Implementation of the `smartcart add` and `smartcart smart-add` commands

use owo_colors::OwoColorize;
use smartcart_core::interaction::{InteractionAdapter, with_progress};
use smartcart_core::{CategorizeOutcome, Category, Item, SmartcartError};
use tracing::info;

use crate::colors::COLORS;
use crate::context::AppContext;
use crate::output::{AddData, JsonIssue, JsonResponse};

/// Join words into one input string, rejecting input that is only whitespace
fn join_input(words: &[String]) -> Result<String, SmartcartError> {
    let joined = words.join(" ");
    if joined.trim().is_empty() {
        return Err(SmartcartError::EmptyInput);
    }
    Ok(joined)
}

/// Run the add command: one item, explicit category
pub fn run_add(ctx: &mut AppContext, name: &[String], category: Category) -> anyhow::Result<i32> {
    let name = join_input(name)?.trim().to_string();
    let item = Item::new(name, category);
    ctx.store.add(item.clone());
    info!(id = %item.id, category = %item.category, "added item");

    if ctx.output.json {
        JsonResponse::ok(
            "add",
            AddData {
                items: vec![item],
                fallback: false,
            },
        )
        .print();
    } else {
        let label = ctx.category_label(&item.category);
        let message = ctx.t_with(
            "message.added",
            &[("name", item.name.as_str()), ("category", label.as_str())],
        );
        ctx.adapter.print_success(&message);
    }

    Ok(0)
}

/// Run the smart-add command: split and categorize free text.
///
/// The text goes to the categorizer as typed; on fallback it becomes one item
/// with exactly that name.
pub fn run_smart_add(ctx: &mut AppContext, text: &[String]) -> anyhow::Result<i32> {
    let text = join_input(text)?;

    let categorizer = &ctx.categorizer;
    let outcome = if categorizer.is_configured() {
        let spinner_message = ctx.t("spinner.smartAdd");
        with_progress(
            &ctx.adapter,
            &spinner_message,
            || categorizer.parse_and_categorize(&text),
            |outcome| !outcome.is_fallback(),
        )
    } else {
        categorizer.parse_and_categorize(&text)
    };

    let fallback_reason = match &outcome {
        CategorizeOutcome::Fallback { reason, .. } => Some(ctx.reason_text(reason)),
        CategorizeOutcome::Categorized(_) => None,
    };

    let items: Vec<Item> = outcome.into_items().into_iter().map(Item::from).collect();
    ctx.store.add_many(items.clone());
    info!(count = items.len(), fallback = fallback_reason.is_some(), "smart-added items");

    if ctx.output.json {
        let data = AddData {
            items,
            fallback: fallback_reason.is_some(),
        };
        match fallback_reason {
            Some(reason) => JsonResponse::ok_with_issues(
                "smart-add",
                data,
                vec![JsonIssue::warning("W001", reason)],
            )
            .print(),
            None => JsonResponse::ok("smart-add", data).print(),
        }
        return Ok(0);
    }

    let fallback = fallback_reason.is_some();
    if let Some(reason) = fallback_reason {
        ctx.adapter
            .print_warning(&ctx.t_with("message.fallback", &[("reason", reason.as_str())]));
    }
    let count = items.len().to_string();
    ctx.adapter
        .print_success(&ctx.t_with("message.addedMany", &[("count", count.as_str())]));
    for item in &items {
        let label = ctx.category_label(&item.category);
        if fallback {
            ctx.adapter.print_info(&format!(
                "  {} ({})",
                item.name,
                label.style(COLORS.warning)
            ));
        } else {
            ctx.adapter
                .print_info(&format!("  {} ({})", item.name, label.style(COLORS.muted)));
        }
    }

    Ok(0)
}
