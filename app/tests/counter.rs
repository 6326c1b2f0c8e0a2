//! Browser test for the counter component. Compiled only for wasm32; run
//! with `wasm-pack test --headless --firefox app`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn query(selector: &str) -> web_sys::Element {
    web_sys::window()
        .unwrap()
        .document()
        .unwrap()
        .query_selector(selector)
        .unwrap()
        .expect(selector)
}

#[wasm_bindgen_test]
fn clicks_increment_the_label() {
    wisp::start(counter::app);

    let heading = query(".app h1");
    assert_eq!(heading.text_content().unwrap(), "Hello Wisp World 🚀");

    let button: web_sys::HtmlElement = query(".card button").unchecked_into();
    assert_eq!(button.text_content().unwrap(), "Clicked 0 times");

    button.click();
    assert_eq!(button.text_content().unwrap(), "Clicked 1 times");

    for _ in 0..9 {
        button.click();
    }
    assert_eq!(button.text_content().unwrap(), "Clicked 10 times");
}
