//! Standalone compare widget.

use shelf_commerce::{AddOutcome, Product, ProductId};
use shelf_observability::StructuredLogger;
use shelf_state::HostGlobals;

use crate::compare_view::{CompareInput, CompareRendering, CompareView, InputSource};
use crate::context::{SurfaceContext, SurfaceKind};

/// Compare table mounted on its own.
///
/// Its products are fixed at mount; only cart membership changes what
/// [`render`](Self::render) returns afterwards.
pub struct CompareSurface<H> {
    ctx: SurfaceContext<H>,
    input: CompareInput,
    logger: StructuredLogger,
}

impl<H: HostGlobals> CompareSurface<H> {
    pub fn mount(ctx: SurfaceContext<H>) -> Self {
        let logger = ctx.logger(SurfaceKind::Compare);
        let input = CompareInput::resolve(&ctx.host, &logger);

        let source = match input.source {
            InputSource::ToolOutput => "tool_output",
            InputSource::WidgetState => "widget_state",
            InputSource::None => "none",
        };
        logger
            .info_builder("surface mounted")
            .field("source", source)
            .field_i64("products", input.items.len() as i64)
            .emit();

        Self { ctx, input, logger }
    }

    pub fn source(&self) -> InputSource {
        self.input.source
    }

    pub fn items(&self) -> &[Product] {
        &self.input.items
    }

    pub fn render(&self) -> CompareRendering {
        CompareView::new(&self.ctx.config).project(&self.input.items, &self.ctx.cart)
    }

    /// Add a compared product to the cart.
    ///
    /// Returns `None` when `id` is not one of the compared products.
    pub fn add_to_cart(&self, id: &ProductId) -> Option<AddOutcome> {
        let product = self.input.items.iter().find(|p| &p.id == id);
        if product.is_none() {
            self.logger
                .warn_builder("add to cart for product not in comparison")
                .field("product_id", id.to_string())
                .emit();
        }
        product.map(|p| self.ctx.cart.add_product(p))
    }

    pub fn context(&self) -> &SurfaceContext<H> {
        &self.ctx
    }
}
