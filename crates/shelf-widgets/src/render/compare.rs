//! Compare table renderer.

use super::{disabled_attr, html_escape};
use crate::compare_view::{Cell, CompareRendering, CompareTable, ImageRef};

/// Render the compare widget.
pub fn render_compare(rendering: &CompareRendering) -> String {
    match rendering {
        CompareRendering::Empty { title, message } => format!(
            r#"<section class="compare compare--empty" data-section="compare">
    <h2 class="compare-title">{}</h2>
    <p class="compare-empty">{}</p>
</section>"#,
            html_escape(title),
            html_escape(message)
        ),
        CompareRendering::Table(table) => render_compare_table(table),
    }
}

fn render_compare_table(table: &CompareTable) -> String {
    let header: String = table
        .header
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let class = if i == 0 { "compare-attr" } else { "compare-product" };
            format!(
                r#"<th scope="col" class="{}">{}</th>"#,
                class,
                html_escape(text)
            )
        })
        .collect();

    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row.cells.iter().map(render_cell).collect();
            format!(
                r#"<tr data-row="{}"><th scope="row">{}</th>{}</tr>"#,
                row.kind.as_str(),
                html_escape(&row.label),
                cells
            )
        })
        .collect();

    format!(
        r#"<section class="compare" data-section="compare" data-columns="{columns}">
    <h2 class="compare-title">{title}</h2>
    <table class="compare-table">
        <caption>{caption}</caption>
        <thead><tr>{header}</tr></thead>
        <tbody>{rows}</tbody>
    </table>
</section>"#,
        columns = table.data_columns(),
        title = html_escape(&table.title),
        caption = html_escape(&table.caption),
        header = header,
        rows = rows
    )
}

fn render_cell(cell: &Cell) -> String {
    match cell {
        Cell::Image(image) => format!("<td>{}</td>", render_image(image)),
        Cell::Text { value } => format!("<td>{}</td>", html_escape(value)),
        Cell::CartAction(action) => format!(
            r#"<td><button class="add-to-cart{}" data-product-id="{}"{}>{}</button></td>"#,
            if action.in_cart { " in-cart" } else { "" },
            html_escape(action.product_id.as_str()),
            disabled_attr(!action.enabled),
            html_escape(&action.label)
        ),
    }
}

/// Render an image reference; the proxy base travels as a data attribute.
pub fn render_image(image: &ImageRef) -> String {
    if image.src.is_empty() {
        return r#"<div class="image-placeholder"></div>"#.to_string();
    }
    let proxy = match &image.proxy_base_url {
        Some(base) => format!(r#" data-proxy="{}""#, html_escape(base)),
        None => String::new(),
    };
    format!(
        r#"<img src="{}" alt="{}" loading="lazy"{}>"#,
        html_escape(&image.src),
        html_escape(&image.alt),
        proxy
    )
}
