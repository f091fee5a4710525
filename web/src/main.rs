fn main() {

    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");

    if let Err(e) = ui::run() {
        dioxus_logger::tracing::error!("page behaviors not started: {e}");
    }
}
