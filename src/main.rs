use std::env;
use std::process;

use log::{error, info};

use quatrot::config::Config;

fn main() {
    env_logger::init();

    let cfg = match Config::new(env::args().skip(1).collect()) {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            process::exit(1);
        }
    };
    info!("{cfg}");

    match cfg.matrix() {
        Ok(mat) => println!("{}", cfg.render(&mat)),
        Err(err) => {
            error!("{err}");
            eprintln!("{err}");
            process::exit(1);
        }
    }
}
