// Trunk entrypoint: binds the controllers once the wasm module loads.
//
// Host builds have nothing to bind and exit immediately.

fn main() {}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn wasm_start() {
    giving_web::start();
}
