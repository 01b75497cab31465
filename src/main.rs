//! rcshim multi-call binary.
//!
//! Link it as `systemctl` and `journalctl`, or run
//! `rcshim <applet> [ARGS...]`.

mod applet;

use applet::{Dispatch, APPLETS};

fn main() {
    exec::logging::init();

    let code = match applet::dispatch(std::env::args().collect()) {
        Dispatch::Run(applet, args) => {
            tracing::debug!(applet = applet.name(), "Dispatching");
            match applet.main(args) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    1
                }
            }
        }
        Dispatch::List => {
            for applet in APPLETS {
                println!("{}", applet.name());
            }
            0
        }
        Dispatch::Usage => {
            let names: Vec<_> = APPLETS.iter().map(|a| a.name()).collect();
            eprintln!("Usage: rcshim <{}> [ARGS...]", names.join("|"));
            eprintln!("       rcshim --list");
            2
        }
    };

    std::process::exit(code);
}
