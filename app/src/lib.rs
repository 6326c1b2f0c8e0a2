use wasm_bindgen::prelude::wasm_bindgen;
use wisp::prelude::*;

/// The counter page: a heading, a static tagline, and a button that counts
/// its own clicks. The count lives in the component and resets whenever the
/// page is reloaded.
pub fn app() -> impl View {
    stateful(0_u32, |count: &Hook<u32>| {
        div()
            .class("app")
            .child(Static(h1().child("Hello Wisp World 🚀")))
            .child(Static(p().child("A counter component, compiled to WebAssembly.")))
            .child(
                div().class("card").child(
                    button()
                        .on_click(count.bind(|count, _: &MouseEvent| *count += 1))
                        .child("Clicked ")
                        .child(count.get())
                        .child(" times"),
                ),
            )
    })
}

#[wasm_bindgen(start)]
fn boot() {
    wisp::start(app);
}
