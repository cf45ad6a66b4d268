//! Symbol image preloading.

use std::collections::HashMap;

use slot_core::SymbolDef;
use web_sys::HtmlImageElement;

/// One `<img>` per symbol, keyed by symbol name.
///
/// Images load in the background; until then [`SymbolImages::ready`] returns
/// `None` and the renderer draws the symbol name instead.
#[derive(Debug, Default)]
pub struct SymbolImages {
    images: HashMap<String, HtmlImageElement>,
}

impl SymbolImages {
    pub fn load(defs: &[SymbolDef]) -> Self {
        let mut images = HashMap::with_capacity(defs.len());
        for def in defs {
            match HtmlImageElement::new() {
                Ok(image) => {
                    image.set_cross_origin(Some("anonymous"));
                    image.set_src(&def.url);
                    images.insert(def.name.clone(), image);
                }
                Err(e) => {
                    tracing::error!(symbol = %def.name, "Failed to create image element: {:?}", e);
                }
            }
        }
        tracing::info!(count = images.len(), "symbol images requested");
        Self { images }
    }

    /// The image for `name` if it has finished loading.
    pub fn ready(&self, name: &str) -> Option<&HtmlImageElement> {
        self.images
            .get(name)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }
}
