//! Preview command: drive a browse surface and render the compare widget.

use std::fs;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use serde_json::{json, Value};
use shelf_commerce::{CartStore, ProductId};
use shelf_observability::StructuredLogger;
use shelf_state::InMemoryHost;
use shelf_widgets::render::render_compare;
use shelf_widgets::{
    BrowseSurface, CompareSurface, EventResult, SurfaceContext, SurfaceEvent, SurfaceKind,
};

use super::{PreviewArgs, PreviewFormat, SurfaceArg};
use crate::context::Context;

/// Run the preview command.
pub fn run(args: PreviewArgs, ctx: &Context) -> Result<()> {
    let path = ctx.resolve_path(&args.catalog);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let catalog: Value = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;

    let host = InMemoryHost::with_tool_output(tool_output(catalog));
    let cart = CartStore::new(
        StructuredLogger::detached()
            .with_surface("cart")
            .with_settings(ctx.config.logging),
    );
    let surface_ctx = SurfaceContext::new(cart, host, Arc::new(ctx.config.clone()));

    let kind = match args.surface {
        SurfaceArg::List => SurfaceKind::List,
        SurfaceArg::Carousel => SurfaceKind::Carousel,
    };
    let mut browse = BrowseSurface::mount(kind, surface_ctx.clone());
    ctx.output
        .debug(&format!("{} mounted with {} products", kind, browse.catalog().len()));

    for id in &args.cart {
        let result = browse.dispatch(SurfaceEvent::AddToCart(ProductId::new(id.as_str())));
        ctx.output.debug(&format!("add {} to cart: {:?}", id, result));
    }

    browse.dispatch(SurfaceEvent::OpenCompareDialog);
    for id in &args.select {
        let result = browse.dispatch(SurfaceEvent::ToggleCompare(ProductId::new(id.as_str())));
        ctx.output.debug(&format!("toggle {}: {:?}", id, result));
    }

    match browse.dispatch(SurfaceEvent::CommitCompare) {
        EventResult::Committed {
            items,
            dropped,
            published,
        } => {
            if !dropped.is_empty() {
                let ids: Vec<&str> = dropped.iter().map(ProductId::as_str).collect();
                ctx.output
                    .warn(&format!("Not in catalog, dropped: {}", ids.join(", ")));
            }
            if !published {
                bail!("Failed to publish the compare selection");
            }
            ctx.output.info(&format!("Published {} products", items));
        }
        EventResult::Rejected(reason) => {
            bail!("Compare selection rejected: {}", reason.to_error("commit"))
        }
        other => bail!("Unexpected commit result: {:?}", other),
    }

    // The compare widget is launched without tool input of its own.
    surface_ctx.host.set_tool_output(json!({}));
    let compare = CompareSurface::mount(surface_ctx);
    let rendering = compare.render();

    if ctx.output.is_json() || args.format == PreviewFormat::Json {
        ctx.output.json(&rendering);
    } else {
        ctx.output.document(&render_compare(&rendering));
    }

    Ok(())
}

/// Accept a tool output object or a bare product array.
fn tool_output(catalog: Value) -> Value {
    match catalog {
        Value::Array(_) => json!({ "places": catalog }),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_output_wraps_arrays() {
        assert_eq!(
            tool_output(json!([{ "id": "a" }])),
            json!({ "places": [{ "id": "a" }] })
        );
        assert_eq!(
            tool_output(json!({ "items": [] })),
            json!({ "items": [] })
        );
    }
}
