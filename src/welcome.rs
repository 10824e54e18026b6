use std::env;
use tracing::info;

pub fn welcome() {

    let version = env!("CARGO_PKG_VERSION");
    let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

    let title = [
        r"  _____     _            _    ____           _        ",
        r" |_   _|_ _| | ___ _ __ | |_ / ___|__ _ _ __| |_ ___  ",
        r"   | |/ _` | |/ _ \ '_ \| __| |   / _` | '__| __/ _ \ ",
        r"   | | (_| | |  __/ | | | |_| |__| (_| | |  | ||  __/ ",
        r"   |_|\__,_|_|\___|_| |_|\__|\____\__,_|_|   \__\___| ",
    ];
    for line in title {
        println!("{}", line);
    }
    println!();
    println!("Version: {} | Run-Mode: {}", version, run_mode);
    println!();
    info!("Starting up TalentCarte in {run_mode} mode.");
}
