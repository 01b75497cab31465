//! systemctl compatibility binary for OpenRC hosts.

fn main() {
    exec::logging::init();

    let code = match rcshim_systemctl::main_with_args(std::env::args().collect()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(code);
}
