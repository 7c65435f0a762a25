//! Implementation of the `smartcart toggle` command

use smartcart_core::SmartcartError;
use smartcart_core::interaction::InteractionAdapter;

use crate::context::AppContext;
use crate::output::{ItemData, JsonResponse};

/// Run the toggle command
pub fn run_toggle(ctx: &mut AppContext, id: &str) -> anyhow::Result<i32> {
    let id = ctx.store.resolve_id(id)?;
    ctx.store.toggle(&id);
    let item = ctx
        .store
        .get(&id)
        .cloned()
        .ok_or(SmartcartError::ItemNotFound { id })?;

    if ctx.output.json {
        JsonResponse::ok("toggle", ItemData { item }).print();
    } else {
        let key = if item.checked {
            "message.toggledDone"
        } else {
            "message.toggledOpen"
        };
        ctx.adapter
            .print_success(&ctx.t_with(key, &[("name", item.name.as_str())]));
    }

    Ok(0)
}
