#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(err) = courier_ui::run() {
        eprintln!("Courier failed: {err}");
        std::process::exit(1);
    }
}
