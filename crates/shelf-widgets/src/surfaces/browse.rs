//! Carousel and list surfaces.
//!
//! Both browse the catalog from `toolOutput`, add to the shared cart,
//! and run their own compare dialog. A commit publishes the selection
//! for the standalone compare widget and opens the same payload in
//! place as a table.

use serde::Serialize;
use shelf_commerce::compare::{
    CommitOutcome, CompareBridge, CompareController, SharedComparePayload, MAX_COMPARE_ITEMS,
    MIN_COMPARE_ITEMS,
};
use shelf_commerce::{AddOutcome, CatalogSnapshot, Product, ProductId};
use shelf_observability::StructuredLogger;
use shelf_state::{GlobalKey, HostGlobals};

use crate::compare_view::{CartAction, CompareRendering, CompareView, ImageRef};
use crate::context::{SurfaceContext, SurfaceKind};
use crate::surfaces::{EventResult, SurfaceEvent};

/// A product as a browsing surface lists it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub rating: String,
    pub description: String,
    pub image: ImageRef,
    /// Cart badge and button.
    pub cart: CartAction,
}

/// One selectable row of the compare dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogRow {
    pub id: ProductId,
    pub name: String,
    pub price_hint: String,
    pub checked: bool,
    /// Unchecked rows are disabled once the selection is full.
    pub disabled: bool,
}

/// The open compare dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareDialogView {
    pub hint: String,
    /// `n/3` counter text.
    pub counter: String,
    pub rows: Vec<DialogRow>,
    pub can_commit: bool,
    pub commit_label: String,
    pub cancel_label: String,
    /// Shown instead of rows when the catalog is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Everything a browsing surface draws, derived on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowseView {
    pub kind: &'static str,
    pub products: Vec<ProductRow>,
    /// The compare button needs at least two products to pick from.
    pub can_open_dialog: bool,
    pub open_dialog_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog: Option<CompareDialogView>,
    /// In-place compare table after a commit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare: Option<CompareRendering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ProductRow>,
    pub all_in_cart: bool,
    /// List only: some product is not in the cart yet.
    pub can_add_all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_all_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

/// Shared engine of the carousel and list widgets.
pub struct BrowseSurface<H> {
    kind: SurfaceKind,
    ctx: SurfaceContext<H>,
    catalog: CatalogSnapshot,
    controller: CompareController,
    bridge: CompareBridge<H>,
    compare_table: Option<SharedComparePayload>,
    focused: Option<ProductId>,
    logger: StructuredLogger,
}

impl<H: HostGlobals + Clone> BrowseSurface<H> {
    /// Mount a surface over the catalog in the host's tool output.
    pub fn mount(kind: SurfaceKind, ctx: SurfaceContext<H>) -> Self {
        let logger = ctx.logger(kind);
        let tool_output = ctx.host.read(GlobalKey::ToolOutput);
        let (catalog, report) = CatalogSnapshot::from_tool_output(tool_output.as_ref());
        report.log_to(&logger);

        logger
            .info_builder("surface mounted")
            .field_i64("products", catalog.len() as i64)
            .emit();

        let controller = CompareController::new(logger.clone());
        let bridge = CompareBridge::new(ctx.host.clone(), logger.clone());
        Self {
            kind,
            ctx,
            catalog,
            controller,
            bridge,
            compare_table: None,
            focused: None,
            logger,
        }
    }

    pub fn carousel(ctx: SurfaceContext<H>) -> Self {
        Self::mount(SurfaceKind::Carousel, ctx)
    }

    pub fn list(ctx: SurfaceContext<H>) -> Self {
        Self::mount(SurfaceKind::List, ctx)
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn controller(&self) -> &CompareController {
        &self.controller
    }

    /// Payload shown in the in-place compare table, if open.
    pub fn compare_payload(&self) -> Option<&SharedComparePayload> {
        self.compare_table.as_ref()
    }

    pub fn focused(&self) -> Option<&ProductId> {
        self.focused.as_ref()
    }

    pub fn context(&self) -> &SurfaceContext<H> {
        &self.ctx
    }

    /// Run the transition for `event`.
    pub fn dispatch(&mut self, event: SurfaceEvent) -> EventResult {
        match event {
            SurfaceEvent::OpenCompareDialog => {
                if self.catalog.len() < MIN_COMPARE_ITEMS || self.controller.is_open() {
                    return EventResult::Unchanged;
                }
                self.controller.open();
                EventResult::Changed
            }
            SurfaceEvent::ToggleCompare(id) => EventResult::Toggled(self.controller.toggle(&id)),
            SurfaceEvent::CommitCompare => self.commit(),
            SurfaceEvent::CancelCompare => {
                if !self.controller.is_open() {
                    return EventResult::Unchanged;
                }
                self.controller.cancel();
                EventResult::Changed
            }
            SurfaceEvent::CloseCompareTable => match self.compare_table.take() {
                Some(_) => EventResult::Changed,
                None => EventResult::Unchanged,
            },
            SurfaceEvent::AddToCart(id) => EventResult::Cart(self.add_to_cart(&id)),
            SurfaceEvent::AddAllToCart => {
                if !self.kind.supports_buy_all() {
                    return EventResult::Unchanged;
                }
                let added = self.ctx.cart.add_all(self.catalog.iter());
                self.logger
                    .info_builder("buy all")
                    .field_i64("added", added as i64)
                    .emit();
                EventResult::AddedAll(added)
            }
            SurfaceEvent::SelectProduct(id) => {
                if !self.catalog.contains(&id) || self.focused.as_ref() == Some(&id) {
                    return EventResult::Unchanged;
                }
                self.focused = Some(id);
                EventResult::Changed
            }
            SurfaceEvent::CloseDetails => match self.focused.take() {
                Some(_) => EventResult::Changed,
                None => EventResult::Unchanged,
            },
        }
    }

    fn commit(&mut self) -> EventResult {
        let commit = match self.controller.commit(&self.catalog) {
            CommitOutcome::Committed(commit) => commit,
            CommitOutcome::Rejected(reason) => return EventResult::Rejected(reason),
        };

        let published = match self.bridge.publish(&commit.payload) {
            Ok(()) => true,
            Err(err) => {
                self.logger
                    .error_builder("compare publish failed")
                    .field("error", err.to_string())
                    .emit();
                false
            }
        };

        let items = commit.payload.len();
        self.compare_table = Some(commit.payload);
        EventResult::Committed {
            items,
            dropped: commit.dropped,
            published,
        }
    }

    fn add_to_cart(&self, id: &ProductId) -> AddOutcome {
        match self.catalog.get(id) {
            Some(product) => self.ctx.cart.add_product(product),
            None => {
                self.logger
                    .warn_builder("add to cart for unknown product")
                    .field("product_id", id.to_string())
                    .emit();
                AddOutcome::Invalid
            }
        }
    }

    /// Derive the current UI state.
    ///
    /// Cart badges are read from the shared store on every call, so a
    /// product added from another surface shows up on the next view.
    pub fn view(&self) -> BrowseView {
        let config = &self.ctx.config;
        let labels = &config.labels;
        let products: Vec<ProductRow> = self.catalog.iter().map(|p| self.product_row(p)).collect();

        let details = self
            .focused
            .as_ref()
            .and_then(|id| self.catalog.get(id))
            .map(|p| self.product_row(p));

        let compare = self
            .compare_table
            .as_ref()
            .map(|payload| CompareView::new(config).project(&payload.items, &self.ctx.cart));

        let all_in_cart = self.ctx.cart.contains_all(self.catalog.as_slice());
        let buy_all = self.kind.supports_buy_all();

        BrowseView {
            kind: self.kind.as_str(),
            products,
            can_open_dialog: self.catalog.len() >= MIN_COMPARE_ITEMS,
            open_dialog_label: labels.open_dialog.clone(),
            dialog: self.controller.is_open().then(|| self.dialog_view()),
            compare,
            details,
            all_in_cart,
            can_add_all: buy_all && !self.catalog.is_empty() && !all_in_cart,
            buy_all_label: buy_all.then(|| labels.buy_all.clone()),
            empty_message: self
                .catalog
                .is_empty()
                .then(|| labels.no_products.clone()),
        }
    }

    fn product_row(&self, product: &Product) -> ProductRow {
        let config = &self.ctx.config;
        let f = config.formatter();
        ProductRow {
            id: product.id.clone(),
            name: f.text(product.name.as_deref()),
            price: f.price(product.price.as_ref()),
            rating: f.rating(product.rating),
            description: f.text(product.description.as_deref()),
            image: ImageRef::for_product(product, &config.images),
            cart: CartAction::for_product(&product.id, &self.ctx.cart, &config.labels),
        }
    }

    fn dialog_view(&self) -> CompareDialogView {
        let config = &self.ctx.config;
        let labels = &config.labels;
        let f = config.formatter();
        let selection = self.controller.selection();
        let max = MAX_COMPARE_ITEMS.to_string();

        let rows = self
            .catalog
            .iter()
            .map(|product| DialogRow {
                id: product.id.clone(),
                name: f.text(product.name.as_deref()),
                price_hint: f.price_hint(product.price.as_ref()),
                checked: selection.contains(&product.id),
                disabled: selection.is_disabled(&product.id),
            })
            .collect();

        CompareDialogView {
            hint: labels.dialog_hint.replace("{max}", &max),
            counter: labels
                .dialog_counter
                .replace("{count}", &selection.len().to_string())
                .replace("{max}", &max),
            rows,
            can_commit: selection.can_commit(),
            commit_label: labels.dialog_commit.clone(),
            cancel_label: labels.dialog_cancel.clone(),
            empty_message: self
                .catalog
                .is_empty()
                .then(|| labels.dialog_empty.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use shelf_commerce::compare::{RejectReason, ToggleOutcome, COMPARE_STATE_KEY};
    use shelf_commerce::{CartStore, ShelfConfig};
    use shelf_state::{read_path, InMemoryHost, StateError};

    fn ctx(places: serde_json::Value) -> SurfaceContext<InMemoryHost> {
        SurfaceContext::new(
            CartStore::default(),
            InMemoryHost::with_tool_output(json!({ "places": places })),
            Arc::new(ShelfConfig::default()),
        )
    }

    fn catalog() -> serde_json::Value {
        json!([
            { "id": "a", "name": "Trapano", "price": 49.9 },
            { "id": "b", "name": "Avvitatore", "price": "free" },
            { "id": "c", "name": "Levigatrice" },
            { "id": "d", "name": "Sega" }
        ])
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    fn select(surface: &mut BrowseSurface<InMemoryHost>, ids: &[&str]) {
        surface.dispatch(SurfaceEvent::OpenCompareDialog);
        for s in ids {
            surface.dispatch(SurfaceEvent::ToggleCompare(id(s)));
        }
    }

    #[test]
    fn test_mount_reads_catalog() {
        let surface = BrowseSurface::list(ctx(catalog()));
        assert_eq!(surface.catalog().len(), 4);
        let view = surface.view();
        assert_eq!(view.kind, "list");
        assert_eq!(view.products[0].price, "49.90 €");
        assert_eq!(view.products[1].price, "free €");
        assert_eq!(view.products[2].price, "—");
        assert!(view.can_open_dialog);
        assert!(view.empty_message.is_none());
    }

    #[test]
    fn test_empty_catalog() {
        let surface = BrowseSurface::carousel(ctx(json!([])));
        let view = surface.view();
        assert!(!view.can_open_dialog);
        assert_eq!(view.empty_message.as_deref(), Some("No products found."));
        assert!(!view.all_in_cart);
    }

    #[test]
    fn test_dialog_needs_two_products() {
        let mut surface = BrowseSurface::list(ctx(json!([{ "id": "a" }])));
        assert_eq!(surface.dispatch(SurfaceEvent::OpenCompareDialog), EventResult::Unchanged);
        assert!(surface.view().dialog.is_none());
    }

    #[test]
    fn test_dialog_rows_and_counter() {
        let mut surface = BrowseSurface::list(ctx(catalog()));
        select(&mut surface, &["a", "b", "c"]);

        let dialog = surface.view().dialog.unwrap();
        assert_eq!(dialog.counter, "Selezionati: 3/3");
        assert!(dialog.can_commit);
        assert!(dialog.rows[0].checked);
        assert!(!dialog.rows[0].disabled);
        assert!(!dialog.rows[3].checked);
        assert!(dialog.rows[3].disabled);
        assert_eq!(dialog.rows[2].price_hint, "Prezzo non disponibile");

        assert_eq!(
            surface.dispatch(SurfaceEvent::ToggleCompare(id("d"))),
            EventResult::Toggled(ToggleOutcome::Rejected(RejectReason::SelectionFull))
        );
    }

    #[test]
    fn test_commit_publishes_and_opens_table() {
        let mut surface = BrowseSurface::list(ctx(catalog()));
        select(&mut surface, &["b", "a"]);

        let result = surface.dispatch(SurfaceEvent::CommitCompare);
        assert_eq!(
            result,
            EventResult::Committed {
                items: 2,
                dropped: vec![],
                published: true
            }
        );

        let state = surface.context().host.read(GlobalKey::WidgetState).unwrap();
        let items = read_path(&state, COMPARE_STATE_KEY).unwrap().as_array().unwrap();
        assert_eq!(items[0]["id"], json!("b"));
        assert_eq!(items[1]["id"], json!("a"));

        let view = surface.view();
        assert!(view.dialog.is_none());
        let table = view.compare.unwrap();
        assert_eq!(table.table().unwrap().header[1], "Avvitatore");

        assert_eq!(surface.dispatch(SurfaceEvent::CloseCompareTable), EventResult::Changed);
        assert!(surface.view().compare.is_none());
    }

    #[derive(Clone)]
    struct RefusingHost(InMemoryHost);

    impl HostGlobals for RefusingHost {
        fn read(&self, key: GlobalKey) -> Option<serde_json::Value> {
            self.0.read(key)
        }

        fn write_widget_state(&self, _value: serde_json::Value) -> Result<(), StateError> {
            Err(StateError::WriteError("quota exceeded".into()))
        }
    }

    #[test]
    fn test_failed_publish_still_opens_table() {
        let ctx = SurfaceContext::new(
            CartStore::default(),
            RefusingHost(InMemoryHost::with_tool_output(json!({ "places": catalog() }))),
            Arc::new(ShelfConfig::default()),
        );
        let mut surface = BrowseSurface::list(ctx);
        surface.dispatch(SurfaceEvent::OpenCompareDialog);
        surface.dispatch(SurfaceEvent::ToggleCompare(id("a")));
        surface.dispatch(SurfaceEvent::ToggleCompare(id("b")));

        assert_eq!(
            surface.dispatch(SurfaceEvent::CommitCompare),
            EventResult::Committed {
                items: 2,
                dropped: vec![],
                published: false
            }
        );
        assert!(surface.view().compare.unwrap().is_table());
    }

    #[test]
    fn test_commit_with_one_selected_is_rejected() {
        let mut surface = BrowseSurface::list(ctx(catalog()));
        select(&mut surface, &["a"]);
        assert_eq!(
            surface.dispatch(SurfaceEvent::CommitCompare),
            EventResult::Rejected(RejectReason::TooFewSelected)
        );
        assert!(surface.controller().is_open());
        assert!(surface.context().host.read(GlobalKey::WidgetState).is_none());
    }

    #[test]
    fn test_cancel_discards_selection() {
        let mut surface = BrowseSurface::carousel(ctx(catalog()));
        select(&mut surface, &["a", "b"]);
        assert_eq!(surface.dispatch(SurfaceEvent::CancelCompare), EventResult::Changed);
        assert_eq!(surface.dispatch(SurfaceEvent::CancelCompare), EventResult::Unchanged);

        surface.dispatch(SurfaceEvent::OpenCompareDialog);
        assert!(surface.controller().selection().is_empty());
    }

    #[test]
    fn test_add_to_cart_updates_badge() {
        let mut surface = BrowseSurface::carousel(ctx(catalog()));
        assert_eq!(
            surface.dispatch(SurfaceEvent::AddToCart(id("a"))),
            EventResult::Cart(AddOutcome::Added)
        );
        assert_eq!(
            surface.dispatch(SurfaceEvent::AddToCart(id("a"))),
            EventResult::Cart(AddOutcome::AlreadyInCart)
        );
        assert_eq!(
            surface.dispatch(SurfaceEvent::AddToCart(id("zzz"))),
            EventResult::Cart(AddOutcome::Invalid)
        );

        let view = surface.view();
        assert!(view.products[0].cart.in_cart);
        assert_eq!(view.products[0].cart.label, "Nel carrello");
        assert!(!view.products[1].cart.in_cart);
    }

    #[test]
    fn test_buy_all_is_list_only() {
        let mut carousel = BrowseSurface::carousel(ctx(catalog()));
        assert_eq!(carousel.dispatch(SurfaceEvent::AddAllToCart), EventResult::Unchanged);
        assert!(carousel.view().buy_all_label.is_none());

        let mut list = BrowseSurface::list(ctx(catalog()));
        list.dispatch(SurfaceEvent::AddToCart(id("c")));
        assert!(list.view().can_add_all);
        assert_eq!(list.dispatch(SurfaceEvent::AddAllToCart), EventResult::AddedAll(3));

        let view = list.view();
        assert!(view.all_in_cart);
        assert!(!view.can_add_all);
        assert_eq!(list.dispatch(SurfaceEvent::AddAllToCart), EventResult::AddedAll(0));
    }

    #[test]
    fn test_product_details_focus() {
        let mut surface = BrowseSurface::list(ctx(catalog()));
        assert_eq!(surface.dispatch(SurfaceEvent::SelectProduct(id("zzz"))), EventResult::Unchanged);
        assert_eq!(surface.dispatch(SurfaceEvent::SelectProduct(id("c"))), EventResult::Changed);
        assert_eq!(surface.view().details.unwrap().name, "Levigatrice");
        assert_eq!(surface.dispatch(SurfaceEvent::CloseDetails), EventResult::Changed);
        assert!(surface.view().details.is_none());
    }

    #[test]
    fn test_event_result_changed() {
        assert!(!EventResult::Unchanged.changed());
        assert!(!EventResult::Cart(AddOutcome::AlreadyInCart).changed());
        assert!(EventResult::Cart(AddOutcome::Added).changed());
        assert!(!EventResult::Toggled(ToggleOutcome::Rejected(RejectReason::SelectionFull)).changed());
        assert!(EventResult::AddedAll(2).changed());
    }
}
