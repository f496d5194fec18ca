//! Carousel/list and compare dialog renderers.

use super::{disabled_attr, html_escape, render_compare, render_image};
use crate::surfaces::{BrowseView, CompareDialogView, ProductRow};

/// Render a browsing surface with its open dialog and in-place table.
pub fn render_browse(view: &BrowseView) -> String {
    let products = match &view.empty_message {
        Some(message) => format!(r#"<p class="shelf-empty">{}</p>"#, html_escape(message)),
        None => view.products.iter().map(render_product_row).collect(),
    };

    let buy_all = match &view.buy_all_label {
        Some(label) => format!(
            r#"<button class="buy-all"{}>{}</button>"#,
            disabled_attr(!view.can_add_all),
            html_escape(label)
        ),
        None => String::new(),
    };

    let dialog = view.dialog.as_ref().map(render_dialog).unwrap_or_default();
    let compare = view.compare.as_ref().map(render_compare).unwrap_or_default();
    let details = view
        .details
        .as_ref()
        .map(render_details)
        .unwrap_or_default();

    format!(
        r#"<section class="shelf shelf--{kind}" data-section="{kind}">
    <div class="shelf-actions">
        <button class="open-compare"{open_disabled}>{open_label}</button>
        {buy_all}
    </div>
    <div class="shelf-products">{products}</div>
    {details}
    {dialog}
    {compare}
</section>"#,
        kind = view.kind,
        open_disabled = disabled_attr(!view.can_open_dialog),
        open_label = html_escape(&view.open_dialog_label),
        buy_all = buy_all,
        products = products,
        details = details,
        dialog = dialog,
        compare = compare
    )
}

/// Render one product card.
pub fn render_product_row(row: &ProductRow) -> String {
    format!(
        r#"<article class="product-card" data-product-id="{id}">
    <div class="product-image">{image}</div>
    <div class="product-info">
        <h3 class="product-title">{name}</h3>
        <span class="rating-value">{rating}</span>
        <div class="product-price">{price}</div>
    </div>
    <button class="add-to-cart{in_cart}" data-product-id="{id}"{disabled}>{label}</button>
</article>"#,
        id = html_escape(row.id.as_str()),
        image = render_image(&row.image),
        name = html_escape(&row.name),
        rating = html_escape(&row.rating),
        price = html_escape(&row.price),
        in_cart = if row.cart.in_cart { " in-cart" } else { "" },
        disabled = disabled_attr(!row.cart.enabled),
        label = html_escape(&row.cart.label)
    )
}

fn render_details(row: &ProductRow) -> String {
    format!(
        r#"<aside class="product-details" data-product-id="{}">
    <h3>{}</h3>
    <p>{}</p>
</aside>"#,
        html_escape(row.id.as_str()),
        html_escape(&row.name),
        html_escape(&row.description)
    )
}

/// Render the compare selection dialog.
pub fn render_dialog(dialog: &CompareDialogView) -> String {
    let rows: String = match &dialog.empty_message {
        Some(message) => format!(r#"<p class="dialog-empty">{}</p>"#, html_escape(message)),
        None => dialog
            .rows
            .iter()
            .map(|row| {
                format!(
                    r#"<label class="dialog-row"><input type="checkbox" value="{}"{}{}> <span>{}</span> <small>{}</small></label>"#,
                    html_escape(row.id.as_str()),
                    if row.checked { " checked" } else { "" },
                    disabled_attr(row.disabled),
                    html_escape(&row.name),
                    html_escape(&row.price_hint)
                )
            })
            .collect(),
    };

    format!(
        r#"<dialog class="compare-dialog" open>
    <p class="dialog-hint">{hint}</p>
    <div class="dialog-rows">{rows}</div>
    <p class="dialog-counter">{counter}</p>
    <button class="dialog-cancel">{cancel}</button>
    <button class="dialog-commit"{commit_disabled}>{commit}</button>
</dialog>"#,
        hint = html_escape(&dialog.hint),
        rows = rows,
        counter = html_escape(&dialog.counter),
        cancel = html_escape(&dialog.cancel_label),
        commit_disabled = disabled_attr(!dialog.can_commit),
        commit = html_escape(&dialog.commit_label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use shelf_commerce::{CartStore, ProductId, ShelfConfig};
    use shelf_state::InMemoryHost;

    use crate::{BrowseSurface, SurfaceContext, SurfaceEvent};

    fn surface() -> BrowseSurface<InMemoryHost> {
        BrowseSurface::list(SurfaceContext::new(
            CartStore::default(),
            InMemoryHost::with_tool_output(json!({
                "places": [{ "id": "a", "name": "A & B" }, { "id": "b" }, { "id": "c" }, { "id": "d" }]
            })),
            Arc::new(ShelfConfig::default()),
        ))
    }

    #[test]
    fn test_render_list() {
        let html = render_browse(&surface().view());
        assert!(html.contains(r#"data-section="list""#));
        assert!(html.contains("A &amp; B"));
        assert!(html.contains(r#"<button class="buy-all">Compra tutto</button>"#));
        assert!(!html.contains("<dialog"));
    }

    #[test]
    fn test_render_dialog_disables_when_full() {
        let mut surface = surface();
        surface.dispatch(SurfaceEvent::OpenCompareDialog);
        for id in ["a", "b", "c"] {
            surface.dispatch(SurfaceEvent::ToggleCompare(ProductId::new(id)));
        }

        let html = render_dialog(&surface.view().dialog.unwrap());
        assert!(html.contains(r#"value="a" checked>"#));
        assert!(html.contains(r#"value="d" disabled>"#));
        assert!(html.contains("Selezionati: 3/3"));
        assert!(html.contains(r#"<button class="dialog-commit">"#));
    }
}
