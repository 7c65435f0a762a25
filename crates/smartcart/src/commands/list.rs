//! Implementation of the `smartcart list` command

use owo_colors::OwoColorize;
use smartcart_core::interaction::InteractionAdapter;
use smartcart_core::{CategoryGroup, group_items};

use crate::colors::COLORS;
use crate::context::AppContext;
use crate::output::{GroupData, JsonResponse, ListData};

/// Characters of the id shown in human output
const SHORT_ID_LEN: usize = 8;

/// Run the list command
pub fn run_list(ctx: &AppContext) -> anyhow::Result<i32> {
    let groups = group_items(ctx.store.items());

    if ctx.output.json {
        let groups = groups
            .into_iter()
            .map(|group| GroupData {
                label: ctx.category_label(&group.name),
                category: group.name,
                items: group.items,
            })
            .collect();
        JsonResponse::ok("list", ListData { groups }).print();
        return Ok(0);
    }

    if !ctx.human() {
        return Ok(0);
    }

    if groups.is_empty() {
        ctx.adapter.print_info(&ctx.t("app.empty.title"));
        ctx.adapter.print_info(&ctx.t("app.empty.subtitle"));
        return Ok(0);
    }

    for (index, group) in groups.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print_group(ctx, group);
    }

    Ok(0)
}

fn print_group(ctx: &AppContext, group: &CategoryGroup) {
    let label = ctx.category_label(&group.name).to_uppercase();
    println!(
        "{} {}",
        label.style(COLORS.active),
        format!("({}/{})", group.completed(), group.items.len()).style(COLORS.muted)
    );

    for item in &group.items {
        let id = short_id(&item.id);
        if item.checked {
            println!(
                "  {} {}  {}",
                "[x]".style(COLORS.success),
                item.name.strikethrough().style(COLORS.muted),
                id.style(COLORS.muted)
            );
        } else {
            println!("  [ ] {}  {}", item.name, id.style(COLORS.muted));
        }
    }
}

/// Short id prefix as shown by `list`
pub fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }
}
