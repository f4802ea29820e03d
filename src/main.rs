// The MIT License (MIT)
//
// Copyright (c) 2016 AT&T
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

extern crate grid_resource_catalog;
extern crate pretty_env_logger;

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;

use std::process;
use std::sync::Arc;
use std::thread;
use grid_resource_catalog::api::run_api;
use grid_resource_catalog::utils::Config;
use grid_resource_catalog::{CatalogError, CatalogService, Result};
use clap::{App, Arg};

fn main() {
    pretty_env_logger::init();

    let matches = App::new("Grid Resource Catalog")
        .about("Catalog of grid resources and the applications installed on them")
        .version(&crate_version!()[..])
        .arg(Arg::with_name("CONFIG")
            .short("c")
            .long("config")
            .required(false)
            .help("Path to configuration file")
            .takes_value(true))
        .arg(Arg::with_name("PORT")
            .short("p")
            .long("port")
            .required(false)
            .help("Port the API listens on, overrides the configuration file")
            .takes_value(true))
        .get_matches();

    let config_file = matches.value_of("CONFIG").unwrap_or("./config/config.yml");
    info!("Config file: {}", config_file);

    if let Err(err) = start(config_file, matches.value_of("PORT")) {
        error!("{}", err);
        process::exit(1);
    }
}

fn start(config_file: &str, port: Option<&str>) -> Result<()> {
    let mut config = Config::load(config_file)?;
    if let Some(port) = port {
        config.api_port = port.parse::<u16>()
            .map_err(|_| CatalogError::Config(format!("invalid port '{}'", port)))?;
    }

    let service = Arc::new(CatalogService::from_config(&config)?);
    info!("{} serving catalog", service.catalog().get_my_name());

    let api_service = service.clone();
    let host = config.api_host.clone();
    let port = config.api_port;
    let api_runner = thread::Builder::new()
        .name("api".to_string())
        .spawn(move || run_api(api_service, &host, port))?;

    // wait forever
    match api_runner.join() {
        Ok(result) => result,
        Err(_) => Err(CatalogError::Server("api thread panicked".to_string())),
    }
}
