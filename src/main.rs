fn main() {
    if let Err(e) = folio::app::run_cli() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
