fn main() {
    // Tauri build embeds the app config and, on Windows, icon resources.
    // Headless builds of the library skip it entirely.
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
