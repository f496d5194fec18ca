//! Compare table projection.
//!
//! The projection is a pure function of the products given and the cart
//! membership at the time it runs. Nothing about the cart is cached in a
//! rendering; project again after the cart changes.

use serde::Serialize;
use serde_json::Value;
use shelf_commerce::compare::{CompareBridge, SharedComparePayload, MAX_COMPARE_ITEMS, MIN_COMPARE_ITEMS};
use shelf_commerce::{CartStore, Formatter, ImageSettings, Labels, Product, ProductId, ShelfConfig};
use shelf_observability::StructuredLogger;
use shelf_state::{GlobalKey, HostGlobals};

/// Attribute rows of the compare table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Image,
    Name,
    Price,
    Rating,
    Pros,
    Cons,
    Description,
    CartAction,
}

/// Rows in display order.
pub const ROW_ORDER: [RowKind; 8] = [
    RowKind::Image,
    RowKind::Name,
    RowKind::Price,
    RowKind::Rating,
    RowKind::Pros,
    RowKind::Cons,
    RowKind::Description,
    RowKind::CartAction,
];

impl RowKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowKind::Image => "image",
            RowKind::Name => "name",
            RowKind::Price => "price",
            RowKind::Rating => "rating",
            RowKind::Pros => "pros",
            RowKind::Cons => "cons",
            RowKind::Description => "description",
            RowKind::CartAction => "cart_action",
        }
    }

    pub fn label<'a>(&self, labels: &'a Labels) -> &'a str {
        match self {
            RowKind::Image => &labels.row_image,
            RowKind::Name => &labels.row_name,
            RowKind::Price => &labels.row_price,
            RowKind::Rating => &labels.row_rating,
            RowKind::Pros => &labels.row_pros,
            RowKind::Cons => &labels.row_cons,
            RowKind::Description => &labels.row_description,
            RowKind::CartAction => &labels.row_cart,
        }
    }
}

/// An image reference handed to the image renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageRef {
    /// Raw reference from the product (may be empty).
    pub src: String,
    pub alt: String,
    /// Proxy base for the renderer; never interpreted here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_base_url: Option<String>,
}

impl ImageRef {
    pub fn for_product(product: &Product, images: &ImageSettings) -> Self {
        Self {
            src: product.image_ref().unwrap_or_default().to_string(),
            alt: product.name.clone().unwrap_or_default(),
            proxy_base_url: images.proxy_base_url.clone(),
        }
    }
}

/// Add-to-cart affordance for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartAction {
    pub product_id: ProductId,
    pub in_cart: bool,
    /// Disabled once the product is in the cart.
    pub enabled: bool,
    pub label: String,
}

impl CartAction {
    pub fn for_product(id: &ProductId, cart: &CartStore, labels: &Labels) -> Self {
        let in_cart = cart.contains(id);
        Self {
            product_id: id.clone(),
            in_cart,
            enabled: !in_cart,
            label: if in_cart {
                labels.in_cart.clone()
            } else {
                labels.add_to_cart.clone()
            },
        }
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Image(ImageRef),
    Text { value: String },
    CartAction(CartAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareRow {
    pub kind: RowKind,
    pub label: String,
    /// One cell per compared product.
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareTable {
    pub title: String,
    pub caption: String,
    /// Attribute header followed by one header per product.
    pub header: Vec<String>,
    pub rows: Vec<CompareRow>,
}

impl CompareTable {
    /// Number of product columns (the label column excluded).
    pub fn data_columns(&self) -> usize {
        self.header.len().saturating_sub(1)
    }
}

/// What the compare widget shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CompareRendering {
    /// Fewer than two products.
    Empty { title: String, message: String },
    Table(CompareTable),
}

impl CompareRendering {
    pub fn is_table(&self) -> bool {
        matches!(self, CompareRendering::Table(_))
    }

    pub fn table(&self) -> Option<&CompareTable> {
        match self {
            CompareRendering::Table(table) => Some(table),
            CompareRendering::Empty { .. } => None,
        }
    }
}

/// Projects products into a compare rendering.
#[derive(Debug, Clone)]
pub struct CompareView<'a> {
    formatter: Formatter,
    labels: &'a Labels,
    images: &'a ImageSettings,
}

impl<'a> CompareView<'a> {
    pub fn new(config: &'a ShelfConfig) -> Self {
        Self {
            formatter: config.formatter(),
            labels: &config.labels,
            images: &config.images,
        }
    }

    /// Project up to three products; more are truncated.
    pub fn project(&self, items: &[Product], cart: &CartStore) -> CompareRendering {
        let items = &items[..items.len().min(MAX_COMPARE_ITEMS)];
        let labels = self.labels;

        if items.len() < MIN_COMPARE_ITEMS {
            return CompareRendering::Empty {
                title: labels.compare_title.clone(),
                message: labels.empty_message.clone(),
            };
        }

        let mut header = Vec::with_capacity(items.len() + 1);
        header.push(labels.attribute_header.clone());
        header.extend(items.iter().enumerate().map(|(i, product)| {
            product
                .name
                .clone()
                .unwrap_or_else(|| labels.product_fallback.replace("{n}", &(i + 1).to_string()))
        }));

        let rows = ROW_ORDER
            .iter()
            .map(|kind| CompareRow {
                kind: *kind,
                label: kind.label(labels).to_string(),
                cells: items.iter().map(|p| self.cell(*kind, p, cart)).collect(),
            })
            .collect();

        CompareRendering::Table(CompareTable {
            title: labels.compare_title.clone(),
            caption: labels
                .compare_caption
                .replace("{count}", &items.len().to_string()),
            header,
            rows,
        })
    }

    fn cell(&self, kind: RowKind, product: &Product, cart: &CartStore) -> Cell {
        let f = &self.formatter;
        let text = |value: String| Cell::Text { value };
        match kind {
            RowKind::Image => Cell::Image(ImageRef::for_product(product, self.images)),
            RowKind::Name => text(f.text(product.name.as_deref())),
            RowKind::Price => text(f.price(product.price.as_ref())),
            RowKind::Rating => text(f.rating(product.rating)),
            RowKind::Pros => text(f.text(product.pro.as_deref())),
            RowKind::Cons => text(f.text(product.contro.as_deref())),
            RowKind::Description => text(f.text(product.description.as_deref())),
            RowKind::CartAction => {
                Cell::CartAction(CartAction::for_product(&product.id, cart, self.labels))
            }
        }
    }
}

/// Where a compare widget's products came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSource {
    /// `toolOutput.items` of the launching tool call.
    ToolOutput,
    /// `widgetState.compareWidget.items` published by another surface.
    WidgetState,
    None,
}

/// The products a compare widget shows, decided once at mount.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareInput {
    pub source: InputSource,
    pub items: Vec<Product>,
}

impl CompareInput {
    /// Pick the input: tool output first, then widget state, then nothing.
    ///
    /// A tool output that carries an `items` array wins even when the
    /// array is empty, so stale widget state never overrides a direct
    /// launch.
    pub fn resolve<H: HostGlobals>(host: H, logger: &StructuredLogger) -> Self {
        let tool_items = host
            .read(GlobalKey::ToolOutput)
            .and_then(|output| output.get("items").filter(|v| v.is_array()).cloned());

        if let Some(items) = tool_items {
            return Self::from_items(InputSource::ToolOutput, &items, logger);
        }

        let bridge = CompareBridge::new(host, logger.clone());
        match bridge.read() {
            Some(payload) => Self {
                source: InputSource::WidgetState,
                items: payload.items,
            },
            None => Self {
                source: InputSource::None,
                items: Vec::new(),
            },
        }
    }

    fn from_items(source: InputSource, items: &Value, logger: &StructuredLogger) -> Self {
        let (payload, report) = SharedComparePayload::from_items_value(items);
        report.log_to(logger);
        Self {
            source,
            items: payload.items,
        }
    }
}
