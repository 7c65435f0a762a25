//! Implementation of the `smartcart remove` command

use smartcart_core::SmartcartError;
use smartcart_core::interaction::InteractionAdapter;

use crate::context::AppContext;
use crate::output::{ItemData, JsonResponse};

/// Run the remove command
pub fn run_remove(ctx: &mut AppContext, id: &str) -> anyhow::Result<i32> {
    let id = ctx.store.resolve_id(id)?;
    let item = ctx
        .store
        .remove(&id)
        .ok_or(SmartcartError::ItemNotFound { id })?;

    if ctx.output.json {
        JsonResponse::ok("remove", ItemData { item }).print();
    } else {
        ctx.adapter
            .print_success(&ctx.t_with("message.removed", &[("name", item.name.as_str())]));
    }

    Ok(0)
}
