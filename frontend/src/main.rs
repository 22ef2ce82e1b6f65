//! Entry point for the WASM application

pub fn main() {
    sci_frontend::start();
}
