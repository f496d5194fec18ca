//! Behavior across independently mounted surfaces sharing one process.

use std::sync::Arc;

use serde_json::{json, Value};
use shelf_commerce::compare::COMPARE_STATE_KEY;
use shelf_commerce::{AddOutcome, CartStore, ProductId, ShelfConfig};
use shelf_state::{read_path, GlobalKey, HostGlobals, InMemoryHost};
use shelf_widgets::{
    BrowseSurface, Cell, CompareRendering, CompareSurface, EventResult, InputSource,
    SurfaceContext, SurfaceEvent, SurfaceKind,
};

fn catalog() -> Value {
    json!({
        "places": [
            { "id": "p1", "name": "Trapano", "price": 49.9, "rating": 4.666, "pro": "Potente" },
            { "id": "p2", "name": "Avvitatore", "price": "free", "rate": "3" },
            { "id": "p3", "name": "Levigatrice", "price": "10 €" },
            { "id": 4, "name": "Sega" }
        ]
    })
}

fn context(tool_output: Value) -> SurfaceContext<InMemoryHost> {
    SurfaceContext::new(
        CartStore::default(),
        InMemoryHost::with_tool_output(tool_output),
        Arc::new(ShelfConfig::default()),
    )
}

fn id(s: &str) -> ProductId {
    ProductId::new(s)
}

fn commit(surface: &mut BrowseSurface<InMemoryHost>, ids: &[&str]) -> EventResult {
    surface.dispatch(SurfaceEvent::OpenCompareDialog);
    for s in ids {
        surface.dispatch(SurfaceEvent::ToggleCompare(id(s)));
    }
    surface.dispatch(SurfaceEvent::CommitCompare)
}

fn cart_actions(rendering: &CompareRendering) -> Vec<bool> {
    let table = rendering.table().expect("table");
    let row = table.rows.last().expect("cart row");
    row.cells
        .iter()
        .map(|cell| match cell {
            Cell::CartAction(action) => action.in_cart,
            other => panic!("unexpected cell {other:?}"),
        })
        .collect()
}

#[test]
fn test_published_selection_renders_like_direct_input() {
    let ctx = context(catalog());
    let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());
    commit(&mut list, &["p2", "p1"]);

    // Compare widget launched with no tool input: reads widget state.
    let published = CompareSurface::mount(SurfaceContext::new(
        ctx.cart.clone(),
        {
            let host = ctx.host.clone();
            host.set_tool_output(json!({}));
            host
        },
        ctx.config.clone(),
    ));
    assert_eq!(published.source(), InputSource::WidgetState);

    // Same products handed over directly as tool input.
    let state = ctx.host.read(GlobalKey::WidgetState).unwrap();
    let items = read_path(&state, COMPARE_STATE_KEY).unwrap().clone();
    let direct = CompareSurface::mount(context(json!({ "items": items })));
    assert_eq!(direct.source(), InputSource::ToolOutput);

    assert_eq!(published.render(), direct.render());
    let table = published.render();
    let header = &table.table().unwrap().header;
    assert_eq!(header, &vec!["Caratteristica", "Avvitatore", "Trapano"]);
}

#[test]
fn test_two_products_two_columns() {
    let surface = CompareSurface::mount(context(json!({
        "items": [{ "id": "a" }, { "id": "b" }]
    })));
    let rendering = surface.render();
    assert_eq!(rendering.table().unwrap().data_columns(), 2);
}

#[test]
fn test_one_product_empty_state() {
    let surface = CompareSurface::mount(context(json!({ "items": [{ "id": "a" }] })));
    assert!(matches!(surface.render(), CompareRendering::Empty { .. }));
}

#[test]
fn test_cart_shared_across_surfaces() {
    let ctx = context(catalog());
    let mut carousel = BrowseSurface::mount(SurfaceKind::Carousel, ctx.clone());
    let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());
    commit(&mut list, &["p1", "p3"]);
    let compare = CompareSurface::mount(ctx.clone());

    assert_eq!(
        carousel.dispatch(SurfaceEvent::AddToCart(id("p1"))),
        EventResult::Cart(AddOutcome::Added)
    );

    // Every surface sees the entry on its next view.
    assert!(list.view().products[0].cart.in_cart);
    assert_eq!(cart_actions(&compare.render()), vec![true, false]);
    let in_place = list.view().compare.unwrap();
    assert_eq!(cart_actions(&in_place), vec![true, false]);

    // Adding again from the compare widget is a no-op.
    assert_eq!(compare.add_to_cart(&id("p1")), Some(AddOutcome::AlreadyInCart));
    assert_eq!(ctx.cart.len(), 1);

    assert_eq!(list.dispatch(SurfaceEvent::AddAllToCart), EventResult::AddedAll(3));
    assert!(carousel.view().all_in_cart);
    assert_eq!(cart_actions(&compare.render()), vec![true, true]);
}

#[test]
fn test_stale_ids_dropped_on_commit() {
    let ctx = context(catalog());
    let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());
    list.dispatch(SurfaceEvent::OpenCompareDialog);
    list.dispatch(SurfaceEvent::ToggleCompare(id("p1")));
    list.dispatch(SurfaceEvent::ToggleCompare(id("gone")));
    list.dispatch(SurfaceEvent::ToggleCompare(id("4")));

    let result = list.dispatch(SurfaceEvent::CommitCompare);
    assert_eq!(
        result,
        EventResult::Committed {
            items: 2,
            dropped: vec![id("gone")],
            published: true
        }
    );

    let compare = CompareSurface::mount({
        ctx.host.set_tool_output(json!({}));
        ctx
    });
    let ids: Vec<&str> = compare.items().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["p1", "4"]);
}

#[test]
fn test_later_commit_overwrites_earlier() {
    let ctx = context(catalog());
    let mut carousel = BrowseSurface::mount(SurfaceKind::Carousel, ctx.clone());
    let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());

    commit(&mut carousel, &["p1", "p2", "p3"]);
    commit(&mut list, &["4", "p3"]);

    ctx.host.set_tool_output(json!({}));
    let compare = CompareSurface::mount(ctx);
    let ids: Vec<&str> = compare.items().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["4", "p3"]);
}

#[test]
fn test_formatting_through_compare_table() {
    let ctx = context(catalog());
    let mut list = BrowseSurface::mount(SurfaceKind::List, ctx.clone());
    commit(&mut list, &["p1", "p2", "p3"]);

    let view = list.view();
    let table = view.compare.as_ref().and_then(|c| c.table()).unwrap();
    let texts = |label: &str| -> Vec<String> {
        table
            .rows
            .iter()
            .find(|row| row.label == label)
            .unwrap()
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Text { value } => value.clone(),
                other => panic!("unexpected cell {other:?}"),
            })
            .collect()
    };

    assert_eq!(texts("Prezzo"), vec!["49.90 €", "free €", "10 €"]);
    assert_eq!(texts("Valutazione"), vec!["4.7", "3.0", "—"]);
    assert_eq!(texts("Pro"), vec!["Potente", "—", "—"]);
}
