use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use api::{init_logging, set_panic_hook};

#[wasm_bindgen]
pub struct Polygon { pub(crate) inner: curvepoly::Polygon }

impl Polygon {
    pub fn rs_new() -> Polygon { Polygon { inner: curvepoly::Polygon::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
    pub fn core(&self) -> &curvepoly::Polygon { &self.inner }
}
