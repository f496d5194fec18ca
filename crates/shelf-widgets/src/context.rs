//! What every surface is given when it mounts.

use std::fmt;
use std::sync::Arc;

use shelf_commerce::{CartStore, ShelfConfig};
use shelf_observability::StructuredLogger;

/// Which widget a surface is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Carousel,
    List,
    Compare,
}

impl SurfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurfaceKind::Carousel => "carousel",
            SurfaceKind::List => "list",
            SurfaceKind::Compare => "compare",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "carousel" => Some(SurfaceKind::Carousel),
            "list" => Some(SurfaceKind::List),
            "compare" => Some(SurfaceKind::Compare),
            _ => None,
        }
    }

    /// Only the list offers "buy all".
    pub fn supports_buy_all(&self) -> bool {
        matches!(self, SurfaceKind::List)
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Process-wide collaborators injected into each surface.
///
/// Create one context at process start and clone it into every surface:
/// the cart and host handles share their state across clones.
#[derive(Debug, Clone)]
pub struct SurfaceContext<H> {
    pub cart: CartStore,
    pub host: H,
    pub config: Arc<ShelfConfig>,
}

impl<H> SurfaceContext<H> {
    pub fn new(cart: CartStore, host: H, config: Arc<ShelfConfig>) -> Self {
        Self { cart, host, config }
    }

    /// A logger for a newly mounted surface, with its own instance id.
    pub fn logger(&self, kind: SurfaceKind) -> StructuredLogger {
        StructuredLogger::detached()
            .with_surface(kind.as_str())
            .with_settings(self.config.logging)
    }
}
