use std::{env, process};

pub fn main() {
    if cfg!(debug_assertions) {
        env::set_var("RUST_BACKTRACE", "1");
    }

    let log_settings = env_logger::Env::new()
        .filter_or("PARLEYD_LOG", "parleyd=debug")
        .write_style("PARLEYD_LOG_STYLE");
    env_logger::Builder::from_env(log_settings)
        .format(|buf, r| {
            use std::io::Write;
            writeln!(buf, "[{:<5} {}] {}", r.level(), r.target(), r.args())
        })
        .init();

    let (port, password) = parse_args();
    parleyd::start(port, password);
}

fn parse_args() -> (u16, String) {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("parleyd", String::as_str);

    if args.len() != 3 {
        eprintln!("parleyd {}", env!("CARGO_PKG_VERSION"));
        eprintln!("Usage: {} <port> <password>", program);
        process::exit(1);
    }

    let port = match args[1].parse::<u16>() {
        Ok(port) if port != 0 => port,
        _ => {
            eprintln!("Invalid port {:?}, expected a number between 1 and 65535", args[1]);
            process::exit(1);
        }
    };

    (port, args[2].clone())
}
