//! Shelf configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shelf_observability::LogSettings;

use crate::format::{FormatSettings, Formatter};
use crate::CommerceError;

/// Configuration shared by every surface of a process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Price, rating and placeholder formatting.
    pub format: FormatSettings,
    /// User-visible labels.
    pub labels: Labels,
    /// Image proxying.
    pub images: ImageSettings,
    /// Log level and format.
    pub logging: LogSettings,
}

impl ShelfConfig {
    /// Load config from a file; `.json` files are JSON, anything else TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CommerceError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_toml_str(&content)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, CommerceError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String, CommerceError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Formatter built from the `[format]` section.
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.format.clone())
    }
}

/// Image section: the proxy base is passed through to the renderer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub proxy_base_url: Option<String>,
}

/// Labels of the compare table, dialog and cart actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub compare_title: String,
    /// `{count}` is replaced with the number of compared products.
    pub compare_caption: String,
    pub empty_message: String,
    /// Header of the attribute column.
    pub attribute_header: String,
    /// Header used for a product without a name; `{n}` is its 1-based position.
    pub product_fallback: String,
    pub row_image: String,
    pub row_name: String,
    pub row_price: String,
    pub row_rating: String,
    pub row_pros: String,
    pub row_cons: String,
    pub row_description: String,
    pub row_cart: String,
    pub add_to_cart: String,
    pub in_cart: String,
    pub open_dialog: String,
    /// `{max}` is replaced with the selection bound.
    pub dialog_hint: String,
    pub dialog_commit: String,
    pub dialog_cancel: String,
    pub dialog_empty: String,
    /// `{count}` and `{max}` are replaced.
    pub dialog_counter: String,
    pub buy_all: String,
    pub no_products: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            compare_title: "Confronto prodotti".into(),
            compare_caption: "Confronto tra {count} prodotti selezionati.".into(),
            empty_message: "Seleziona almeno 2 prodotti per aprire il confronto.".into(),
            attribute_header: "Caratteristica".into(),
            product_fallback: "Prodotto {n}".into(),
            row_image: "Immagine".into(),
            row_name: "Nome".into(),
            row_price: "Prezzo".into(),
            row_rating: "Valutazione".into(),
            row_pros: "Pro".into(),
            row_cons: "Contro".into(),
            row_description: "Descrizione".into(),
            row_cart: "Carrello".into(),
            add_to_cart: "Aggiungi".into(),
            in_cart: "Nel carrello".into(),
            open_dialog: "Confronta".into(),
            dialog_hint: "Seleziona da 2 a {max} prodotti.".into(),
            dialog_commit: "Apri confronto".into(),
            dialog_cancel: "Annulla".into(),
            dialog_empty: "Nessun prodotto disponibile.".into(),
            dialog_counter: "Selezionati: {count}/{max}".into(),
            buy_all: "Compra tutto".into(),
            no_products: "No products found.".into(),
        }
    }
}
